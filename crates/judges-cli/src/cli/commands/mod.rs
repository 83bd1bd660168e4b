use super::args::{Cli, Command};

pub mod pull;
pub mod push;
pub mod trim;
pub mod update;

/// Exit code of a fully successful run.
pub const EXIT_SUCCESS: i32 = 0;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Update(args) => update::run(args),
        Command::Trim(args) => trim::run(args),
        Command::Push(args) => push::run(args).await,
        Command::Pull(args) => pull::run(args).await,
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(EXIT_SUCCESS)
        }
    }
}
