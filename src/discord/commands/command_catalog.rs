// Discord commands module.
// Each feature gets its own command file.

pub mod help;

// explain / fix
pub mod assist;

pub mod settings;

pub mod stats;

pub mod presence;
