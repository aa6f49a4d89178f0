#![expect(clippy::expect_used, reason = "test scenarios panic on invalid fixtures")]

mod agenda;
mod colors;
mod coordinates;
mod grouping;
mod helpers;
