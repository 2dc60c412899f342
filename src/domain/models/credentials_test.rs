use super::Credentials;

#[test]
fn it_starts_anonymous() {
    assert_eq!(Credentials::default().get(), None);
}

#[test]
fn it_shares_the_token_between_clones() {
    let credentials = Credentials::default();
    let client_side = credentials.clone();

    credentials.set("abc123");
    assert_eq!(client_side.get(), Some("abc123".to_string()));

    credentials.clear();
    assert_eq!(client_side.get(), None);
}

#[test]
fn it_treats_blank_tokens_as_anonymous() {
    let credentials = Credentials::with_token("  ");
    assert_eq!(credentials.get(), None);
}
