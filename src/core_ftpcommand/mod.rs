// Here's the list of the FTP commands implemented
pub mod cwd;
pub mod feat;
pub mod list;
pub mod mdtm;
pub mod pass;
pub mod pwd;
pub mod quit;
pub mod retr;
pub mod size;
pub mod syst;
pub mod type_;
pub mod user;

// Verb table and dispatch
pub mod error;
pub mod ftpcommand;
pub mod handlers;

// The utils and common functions are here
pub mod utils;
