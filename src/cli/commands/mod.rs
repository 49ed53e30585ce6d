pub mod booking;
pub mod config;
pub mod flights;
pub mod system;

use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in system::definitions()
        .into_iter()
        .chain(flights::definitions())
        .chain(booking::definitions())
        .chain(config::definitions())
    {
        registry.register(entry);
    }
    registry.alias("quit", "exit");
    registry.alias("?", "help");
}
