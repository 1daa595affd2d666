//! Diesel table definitions for the people schema.
//!
//! These definitions must match `migrations/*_create_people/up.sql`. The
//! repository executes that file on startup, so the two evolve together.

diesel::table! {
    /// People records.
    users (id) {
        /// Primary key assigned by `BIGSERIAL`.
        id -> BigInt,
        first_name -> Varchar,
        last_name -> Varchar,
        gender -> Varchar,
        nationality -> Varchar,
        /// Age in years; non-negative by check constraint.
        age -> Integer,
    }
}

diesel::table! {
    /// Email addresses owned by users. Addresses are globally unique.
    emails (id) {
        id -> BigInt,
        /// Owning user; rows cascade when the user is deleted.
        user_id -> BigInt,
        email -> Varchar,
    }
}

diesel::table! {
    /// Canonical friendship pairs with `id_first_friend < id_second_friend`.
    friends (id_first_friend, id_second_friend) {
        id_first_friend -> BigInt,
        id_second_friend -> BigInt,
    }
}

diesel::joinable!(emails -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, emails, friends);
