// SPDX-License-Identifier: Apache-2.0

//! The auxiliary hygiene checks: simple filters over a list of file paths,
//! each returning the violations it found.

pub mod exclude_paths;
pub mod line_count;
pub mod shell_options;
pub mod todo_refs;

pub use exclude_paths::check_exclude_paths;
pub use line_count::check_line_count;
pub use shell_options::check_shell_options;
pub use todo_refs::check_todo_refs;
