/// Name of the unique constraint guarding `telegram_auth_tokens.token_hash`.
pub const TOKEN_HASH_CONSTRAINT: &str = "telegram_auth_tokens_token_hash_key";

pub fn is_unique_violation_on_token_hash(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(TOKEN_HASH_CONSTRAINT))
}
