use super::*;

// =============================================================================
// generate_token
// =============================================================================

#[test]
fn generate_token_is_64_hex_chars() {
    let token = generate_token();
    assert_eq!(token.len(), 64);
}

#[test]
fn generate_token_all_valid_hex() {
    let token = generate_token();
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn generate_token_two_calls_differ() {
    let a = generate_token();
    let b = generate_token();
    assert_ne!(a, b);
}

// =============================================================================
// hash_token
// =============================================================================

#[test]
fn hash_token_known_vector() {
    assert_eq!(hash_token("abc"), "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
}

#[test]
fn hash_token_is_deterministic() {
    let token = generate_token();
    assert_eq!(hash_token(&token), hash_token(&token));
}

#[test]
fn hash_token_differs_from_token() {
    let token = generate_token();
    assert_ne!(hash_token(&token), token);
}

// =============================================================================
// expires_at
// =============================================================================

#[test]
fn expires_at_is_in_the_future() {
    let before = OffsetDateTime::now_utc();
    let expiry = expires_at(time::Duration::hours(1));
    assert!(expiry > before + time::Duration::minutes(59));
    assert!(expiry <= OffsetDateTime::now_utc() + time::Duration::hours(1));
}
