use std::process::ExitCode;

use clap::Parser;
use joint_teleop::cli::Cli;
use joint_teleop::console::Console;
use joint_teleop::control::{Cadence, ControlSession};
use joint_teleop::input::{KeyPump, KeySource};
use joint_teleop::shutdown::ShutdownCoordinator;
use joint_teleop::terminal::TerminalGuard;
use joint_teleop::{logging, publisher, TeleopError};
use term_input::TtyReader;

/// Conventional exit status for a SIGINT-terminated program.
const EXIT_INTERRUPTED: u8 = 130;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_tracing();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(TeleopError::Interrupted) => ExitCode::from(EXIT_INTERRUPTED),
        Err(err) => {
            tracing::error!(error = %err, "joint-teleop failed");
            eprintln!("Error: {}", err);
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<(), TeleopError> {
    let config = cli.load_config()?;
    let store = config.joint_store()?;
    let cadence = Cadence::from(&config);
    let mut publisher = publisher::from_config(&config.publisher)?;

    let mut shutdown = ShutdownCoordinator::new();
    shutdown.register_signals().map_err(TeleopError::Signals)?;

    let guard = TerminalGuard::acquire()?;
    let reader =
        TtyReader::open().map_err(|source| TeleopError::TerminalUnavailable { source })?;
    let mut keys: Box<dyn KeySource> = if config.input.threaded {
        Box::new(KeyPump::spawn(reader).map_err(TeleopError::Input)?)
    } else {
        Box::new(reader)
    };

    let mut session = ControlSession::new(store, config.joints.step_size, guard);
    let mut console = Console::stdout();
    let result = session.run(
        keys.as_mut(),
        &mut publisher,
        &mut console,
        &shutdown.handle(),
        cadence,
    );

    // Stop the reader thread before the terminal mode goes back.
    drop(keys);
    session.finish();
    result
}
