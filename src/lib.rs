//! jest-debug - launch configuration resolution for Jest
//!
//! Given a launch profile, a test file and a workspace root, the
//! [`resolver`] picks the Jest config and working directory through ordered
//! pattern routing, checks that every path exists, and merges the result
//! with the settings every session must carry. The CLI around it reads
//! profiles from `launch.json` and starts node.

pub mod cli;
pub mod commands;
pub mod common;
pub mod launch;
pub mod probe;
pub mod profile;
pub mod report;
pub mod resolver;
pub mod version;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use profile::{Profile, RoutingRule};
pub use report::{RecordingReporter, Reporter};
pub use resolver::{ConfigResolver, ResolvedConfiguration};
