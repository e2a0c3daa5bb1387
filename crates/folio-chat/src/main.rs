//! A terminal front end for the portfolio chat assistant.

#[macro_use]
extern crate tracing;

mod config;
mod render;

use std::io::Write as _;
use std::time::Duration;

use folio_chat_core::flow::{MORE_OPTIONS, Topic};
use folio_chat_core::{Controller, ControllerBuilder, Snapshot};
use folio_chat_http::{EndpointService, OpenAIConfigBuilder, OpenAIService};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt};
use tokio::select;
use tokio::time::sleep;

use crate::config::{AppConfig, Backend};

const BAR_CHAR: &str = "▎";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };
    debug!("starting with {config:?}");

    let controller = build_controller(config.backend);

    println!(
        "{}",
        "Hi! Ask me anything about my work, or pick a chip by its number."
            .bright_white()
    );
    println!(
        "{}",
        "Commands: /drop N, /ideas, /reset, /quit. An empty line sends the draft."
            .dimmed()
    );
    render::chips(&controller.snapshot());

    let mut stdin = io::BufReader::new(io::stdin());
    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let Some(line) = read_line(&mut stdin).await else {
            break;
        };
        let line = line.trim();
        let snapshot = controller.snapshot();

        match Input::parse(line, &snapshot) {
            Input::Quit => break,
            Input::Reset => {
                controller.reset();
                println!("{}", "Starting over.".dimmed());
                wait_until(&controller, |s| s.history.is_empty()).await;
            }
            Input::Ideas => {
                let ideas = with_spinner(
                    "💡 Looking for ideas...",
                    controller.request_ideas(),
                )
                .await;
                render::ideas(&ideas);
                continue;
            }
            Input::Drop(label) => {
                controller.drop_chip(label);
                let snapshot =
                    wait_until(&controller, |s| s.draft == label).await;
                render::draft(&snapshot);
                continue;
            }
            Input::SendDraft => {
                controller.submit_draft();
                wait_for_reply(&controller, snapshot.history.len()).await;
            }
            Input::Chip(label) => {
                let before = snapshot.history.len();
                controller.click_chip(label);
                if label == MORE_OPTIONS {
                    wait_until(&controller, |s| s.topic == Topic::Home).await;
                } else {
                    wait_for_reply(&controller, before).await;
                }
            }
            Input::Text(text) => {
                controller.submit(text);
                wait_for_reply(&controller, snapshot.history.len()).await;
            }
            Input::Nothing => continue,
            Input::Invalid(message) => {
                println!("{}", message.bright_red());
                continue;
            }
        }

        render::chips(&controller.snapshot());
    }
}

fn build_controller(backend: Backend) -> Controller {
    match backend {
        Backend::Endpoint { url } => {
            ControllerBuilder::with_service(EndpointService::new(url)).build()
        }
        Backend::OpenAI {
            api_key,
            base_url,
            model,
        } => {
            let mut builder = OpenAIConfigBuilder::with_api_key(api_key)
                .with_system_prompt(include_str!("./system_prompt.md"));
            if let Some(base_url) = base_url {
                builder = builder.with_base_url(base_url);
            }
            if let Some(model) = model {
                builder = builder.with_model(model);
            }
            ControllerBuilder::with_service(OpenAIService::new(builder.build()))
                .build()
        }
    }
}

/// One line typed by the visitor.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Quit,
    Reset,
    Ideas,
    Drop(&'static str),
    SendDraft,
    Chip(&'static str),
    Text(&'a str),
    Nothing,
    Invalid(&'static str),
}

impl<'a> Input<'a> {
    fn parse(line: &'a str, snapshot: &Snapshot) -> Self {
        let chip = |index: &str| {
            let index = index.trim().parse::<usize>().ok()?;
            snapshot.suggestions.get(index.checked_sub(1)?).copied()
        };

        match line {
            "/quit" => Input::Quit,
            "/reset" => Input::Reset,
            "/ideas" => Input::Ideas,
            "" if snapshot.draft.is_empty() => Input::Nothing,
            "" => Input::SendDraft,
            _ => {
                if let Some(index) = line.strip_prefix("/drop") {
                    return chip(index)
                        .map_or(Input::Invalid("no such chip"), Input::Drop);
                }
                if line.starts_with('/') {
                    return Input::Invalid("unknown command");
                }
                if line.bytes().all(|b| b.is_ascii_digit()) {
                    return chip(line)
                        .map_or(Input::Invalid("no such chip"), Input::Chip);
                }
                Input::Text(line)
            }
        }
    }
}

/// Waits for the turn started after `before` turns, with a spinner.
async fn wait_for_reply(controller: &Controller, before: usize) {
    let snapshot = with_spinner(
        "🤔 Thinking...",
        wait_until(controller, |s| !s.pending && s.history.len() > before),
    )
    .await;
    if let Some(turn) = snapshot.history.last() {
        println!(
            "{}🤖 {}",
            BAR_CHAR.bright_cyan(),
            render::markdown_bold(&turn.bot)
        );
    }
}

async fn wait_until(
    controller: &Controller,
    f: impl FnMut(&Snapshot) -> bool,
) -> Snapshot {
    let mut snapshot_rx = controller.subscribe();
    match snapshot_rx.wait_for(f).await {
        Ok(snapshot) => snapshot.clone(),
        Err(_) => {
            warn!("controller has terminated");
            controller.snapshot()
        }
    }
}

async fn with_spinner<T>(message: &'static str, fut: impl Future<Output = T>) -> T {
    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    let progress_bar = ProgressBar::new_spinner();
    progress_bar.set_style(progress_style);
    progress_bar.set_message(message);

    let mut fut = std::pin::pin!(fut);
    let output = loop {
        progress_bar.inc(1);
        select! {
            output = &mut fut => break output,
            _ = sleep(Duration::from_millis(100)) => {}
        }
    };

    // Finish the progress bar before printing anything else.
    progress_bar.finish_and_clear();
    output
}

async fn read_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> Option<String> {
    let mut line = String::new();

    match reader.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}
