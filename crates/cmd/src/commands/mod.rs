// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

pub mod generate;
pub mod parse;
pub mod register;
pub mod run;

pub use generate::generate_command;
pub use parse::parse_command;
pub use register::register_command;
pub use run::run_command;
