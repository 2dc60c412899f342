#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::process;
use std::sync::Arc;

use anyhow::Error;
use anyhow::Result;
use domain::models::Action;
use domain::models::ChatServiceBox;
use domain::models::Credentials;
use domain::models::Event;
use infrastructure::api::HttpChatService;
use owo_colors::OwoColorize;
use owo_colors::Stream;
use tokio::sync::mpsc;
use tokio::task;

use crate::application::cli;
use crate::application::shell;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::services::actions::ActionsService;
use crate::domain::services::TokenStore;

fn handle_error(err: Error) {
    let message = format!(
        "Oh no! Parley has failed with the following app version and error.\n\nVersion: {}\nCommit: {}\nError: {}",
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE"),
        err
    );
    eprintln!(
        "{}",
        message.if_supports_color(Stream::Stderr, |e| return e.red())
    );

    let backtrace = err.backtrace();
    if backtrace.to_string() == "disabled backtrace" {
        let args = env::args().collect::<Vec<String>>().join(" ");
        eprintln!("\nRunning the following can help explain further what the issue is:");
        eprintln!("\nRUST_BACKTRACE=1 {args}");
    } else {
        eprintln!("\n{}", backtrace);
    }

    process::exit(1);
}

async fn run() -> Result<()> {
    let token_store = TokenStore::default();
    let credentials = Credentials::default();
    match token_store.load().await {
        Ok(Some(token)) => credentials.set(&token),
        Ok(None) => (),
        Err(err) => tracing::warn!(error = ?err, "Failed to read stored bearer token"),
    }

    let service: ChatServiceBox = Arc::new(HttpChatService::new(
        &Config::get(ConfigKey::ApiURL),
        credentials.clone(),
    ));

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    let mut background_futures = task::JoinSet::new();
    background_futures.spawn(async move {
        return ActionsService::start(
            service,
            credentials,
            token_store,
            event_tx,
            &mut action_rx,
        )
        .await;
    });

    let shell_future = shell::start(action_tx, event_rx);

    let res = tokio::select!(
        res = background_futures.join_next() => match res {
            Some(Ok(worker_res)) => worker_res,
            Some(Err(join_err)) => Err(join_err.into()),
            None => Ok(()),
        },
        res = shell_future => res,
    );

    return res;
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let file_appender = tracing_appender::rolling::never(Config::log_dir(), "debug.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    if env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("parley")
    {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(writer)
            .init();
    }

    match cli::parse().await {
        Ok(true) => (),
        Ok(false) => process::exit(0),
        Err(err) => {
            handle_error(err);
            return;
        }
    }

    if let Err(err) = run().await {
        handle_error(err);
    }

    process::exit(0);
}
