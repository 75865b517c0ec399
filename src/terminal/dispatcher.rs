//! Routes a raw line to its workflow.

use crate::errors::{TerminalError, TerminalResult};
use crate::messages;
use crate::terminal::command::{CommandTable, GuardPolicy};
use crate::terminal::guard::{ExecutionGuard, GuardFlags};
use crate::terminal::parser::parse_input;
use crate::terminal::{Console, SessionState};
use crate::workflows::Services;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::debug;

/// Looks commands up, checks arguments and runs workflows through the guard
pub struct Dispatcher {
    services: Services,
    console: Arc<dyn Console>,
    guard: ExecutionGuard,
    rng: StdRng,
}

impl Dispatcher {
    /// `seed` fixes the choice of not-found replies; `None` seeds from the OS.
    pub fn new(services: Services, console: Arc<dyn Console>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            services,
            console,
            guard: ExecutionGuard::new(),
            rng,
        }
    }

    pub fn guard_flags(&self) -> &GuardFlags {
        self.guard.flags()
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn console(&self) -> &dyn Console {
        self.console.as_ref()
    }

    /// Handle one raw input line. Every failure ends up as one emitted line.
    pub async fn handle_command(
        &mut self,
        table: &CommandTable,
        session: &mut SessionState,
        raw: &str,
    ) {
        if let Err(err) = self.dispatch(table, session, raw).await {
            self.console.emit_line(&err.to_string());
        }
    }

    async fn dispatch(
        &mut self,
        table: &CommandTable,
        session: &mut SessionState,
        raw: &str,
    ) -> TerminalResult<()> {
        let input = parse_input(raw);
        let Some(route) = table.get(&input.command) else {
            debug!(command = %input.command, "unknown command");
            return Err(TerminalError::CommandNotFound(self.not_found().to_string()));
        };
        if route.command.requires_argument && !input.has_argument() {
            return Err(TerminalError::MissingArgument);
        }

        let argument = input.argument.to_lowercase();
        debug!(
            command = %route.command.name,
            workflow = ?route.workflow,
            argument = %argument,
            "dispatching"
        );

        let ctx = self.services.context(self.console.as_ref());
        match route.guard {
            GuardPolicy::Unguarded => route.workflow.run(&ctx, session, &argument).await,
            GuardPolicy::Guarded { error_override } => {
                let outcome = self
                    .guard
                    .run(ctx.console, route.workflow.run(&ctx, session, &argument))
                    .await;
                self.guard
                    .report(ctx.console, session, error_override, outcome);
                Ok(())
            }
        }
    }

    fn not_found(&mut self) -> &'static str {
        messages::NOT_FOUND
            .choose(&mut self.rng)
            .copied()
            .unwrap_or("Command not found")
    }
}
