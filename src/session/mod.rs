pub mod console;
mod format;
mod handlers;

use crate::storage::UserStore;
use console::Console;
use tracing::debug;

const RULE: &str = "================================================================================";

/// The interactive menu loop. One sequential actor: every storage call and
/// every prompt is a blocking point, nothing runs in between.
pub struct Session<'a> {
    store: &'a dyn UserStore,
    console: &'a mut dyn Console,
}

impl<'a> Session<'a> {
    pub fn new(store: &'a dyn UserStore, console: &'a mut dyn Console) -> Self {
        Self { store, console }
    }

    /// Runs until the user exits. Storage errors escape to the caller, which
    /// owns connection cleanup; validation problems never leave the loop.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut running = true;

        while running {
            self.console.say("");
            self.console.say(RULE);
            self.console.say("MAIN MENU");
            self.console.say(RULE);

            // The snapshot below goes stale as soon as anything mutates
            // storage; it is only used to index choices this iteration.
            let users = handlers::display_users(self.store, self.console).await?;

            self.console.say("\nOptions:");
            self.console.say("  [1] Add new user");
            self.console.say("  [2] Modify existing user");
            self.console.say("  [3] Refresh view");
            self.console.say("  [4] Exit");

            let choice = self.console.ask("\nWhat would you like to do?").await?;
            debug!(choice = %choice, "menu selection");

            match choice.as_str() {
                "1" => {
                    handlers::create_user(self.store, self.console).await?;
                }
                "2" => {
                    if users.is_empty() {
                        self.console.say("No users to modify");
                    } else {
                        handlers::modify_user(self.store, self.console, &users).await?;
                    }
                }
                "3" => self.console.say("Refreshing..."),
                "4" => {
                    self.console.say("Goodbye!");
                    running = false;
                }
                _ => self.console.say("Invalid choice, please try again (1-4)"),
            }
        }

        Ok(())
    }
}
