use anyhow::Result;

use super::TokenStore;

#[tokio::test]
async fn it_loads_nothing_without_a_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = TokenStore::new(dir.path().join("token"));

    assert_eq!(store.load().await?, None);

    return Ok(());
}

#[tokio::test]
async fn it_saves_and_loads_a_token() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = TokenStore::new(dir.path().join("nested/parley/token"));

    store.save("abc123\n").await?;

    assert_eq!(store.load().await?, Some("abc123".to_string()));

    return Ok(());
}

#[tokio::test]
async fn it_deletes_idempotently() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = TokenStore::new(dir.path().join("token"));
    store.save("abc123").await?;

    store.delete().await?;
    store.delete().await?;

    assert!(!store.file_path.exists());
    assert_eq!(store.load().await?, None);

    return Ok(());
}

#[tokio::test]
async fn it_ignores_blank_token_files() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = TokenStore::new(dir.path().join("token"));
    std::fs::write(&store.file_path, "  \n")?;

    assert_eq!(store.load().await?, None);

    return Ok(());
}
