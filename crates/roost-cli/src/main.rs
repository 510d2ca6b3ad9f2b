use anyhow::Result;
use clap::{Parser, Subcommand};
use cliclack::input;
use console::style;
use tracing_subscriber::EnvFilter;

use roost::agent::Agent;
use roost::config::{AppConfig, LogFormat};
use roost::tools::calculator::{CalculatorInput, CalculatorTool};
use roost::tools::search::{WebSearchInput, WebSearchTool};

#[derive(Parser)]
#[command(author, version, about = "Conversational agent scaffold", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start an interactive chat session (the default)
    Chat {
        /// Send a single message and exit
        #[arg(short, long)]
        message: Option<String>,
    },
    /// List the demo tools and run their scripted examples
    Tools,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{} {}", style("Error:").red().bold(), err);
            eprintln!("Copy .env.example to .env and set GOOGLE_API_KEY before running.");
            std::process::exit(1);
        }
    };

    init_tracing(&config);

    match cli.command.unwrap_or(Command::Chat { message: None }) {
        Command::Chat { message } => chat(config, message).await,
        Command::Tools => tools_demo(config),
    }
}

fn init_tracing(config: &AppConfig) {
    let level = if config.agent.debug {
        "debug"
    } else {
        config.agent.log_level.as_str()
    };
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match config.agent.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

fn build_agent(config: AppConfig) -> Agent {
    let mut agent = Agent::new(config);
    agent.register_tool(Box::new(CalculatorTool::new()));
    agent.register_tool(Box::new(WebSearchTool::new()));
    agent
}

/// What one line of interactive input asks for.
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand<'a> {
    Quit,
    Reset,
    Skip,
    Message(&'a str),
}

impl<'a> ReplCommand<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            ReplCommand::Skip
        } else if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            ReplCommand::Quit
        } else if line.eq_ignore_ascii_case("reset") {
            ReplCommand::Reset
        } else {
            ReplCommand::Message(line)
        }
    }
}

async fn chat(config: AppConfig, message: Option<String>) -> Result<()> {
    let mut agent = build_agent(config);

    if let Some(message) = message {
        let response = agent.process(&message).await?;
        println!("{}", response.message);
        return Ok(());
    }

    println!(
        "{} {}",
        style(agent.config().agent.name.clone()).cyan().bold(),
        style("- type \"quit\" to end the session, \"reset\" to clear history").dim()
    );

    loop {
        let line: String = match input("You:").placeholder("").interact() {
            Ok(line) => line,
            // Interrupted input ends the session cleanly
            Err(_) => {
                println!("Goodbye!");
                break;
            }
        };

        match ReplCommand::parse(&line) {
            ReplCommand::Quit => {
                println!("Goodbye!");
                break;
            }
            ReplCommand::Reset => {
                agent.reset();
                println!("Conversation history cleared.\n");
            }
            ReplCommand::Skip => continue,
            ReplCommand::Message(text) => match agent.process(text).await {
                Ok(response) => {
                    println!("{} {}\n", style("Agent:").green().bold(), response.message);
                }
                Err(err) => {
                    eprintln!("{} {}\n", style("Error:").red().bold(), err);
                }
            },
        }
    }
    Ok(())
}

fn tools_demo(config: AppConfig) -> Result<()> {
    let agent = build_agent(config);
    println!("Registered tools: {}\n", agent.tool_names().join(", "));

    println!("{}", style("Calculator").bold());
    let calculator = CalculatorTool::new();
    let product = calculator.execute(&CalculatorInput {
        operation: "multiply".to_string(),
        a: 15.0,
        b: 7.0,
    })?;
    println!("  15 x 7 = {}\n", product.result);

    println!("{}", style("Web search").bold());
    let search = WebSearchTool::new();
    let found = search.execute(&WebSearchInput::new("agent scaffolding", 3)?)?;
    println!("  Query: {}", found.query);
    for (index, result) in found.results.iter().enumerate() {
        println!("  {}. {}", index + 1, result.title);
        println!("     {}", result.url);
        println!("     {}", result.snippet);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repl_commands_parse_case_insensitively() {
        assert_eq!(ReplCommand::parse("QUIT"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("exit"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("Reset"), ReplCommand::Reset);
        assert_eq!(ReplCommand::parse("   "), ReplCommand::Skip);
        assert_eq!(
            ReplCommand::parse(" hello there "),
            ReplCommand::Message("hello there")
        );
    }
}
