// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the docket command-line interface.
//!
//! Two subcommands: `search` runs one of the engines against a corpus, and
//! `inspect` prints the structure of a `.dkvx` vector index and checks it.

pub mod display;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "docket",
    about = "Lexical and semantic snippet search over agenda documents",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Which engine answers the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Literal, case-insensitive search over full documents
    Lexical,
    /// Nearest snippets by embedding distance
    Semantic,
    /// Reciprocal rank fusion of both, per document
    Hybrid,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search a corpus and display results
    Search {
        /// Search query
        query: String,

        /// Engine to use
        #[arg(short, long, value_enum, default_value = "hybrid")]
        mode: Mode,

        /// Document table (.json array or .jsonl)
        #[arg(short, long)]
        documents: PathBuf,

        /// Snippet table (.json array or .jsonl); needed for semantic and hybrid
        #[arg(short, long)]
        snippets: Option<PathBuf>,

        /// Vector index built from the snippet table; needed for semantic and hybrid
        #[arg(short, long)]
        index: Option<PathBuf>,

        /// TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Nearest neighbours to request (defaults to the config's default_k)
        #[arg(short)]
        k: Option<usize>,

        /// Print results as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Inspect a .dkvx index file
    Inspect {
        /// Path to .dkvx file
        file: PathBuf,
    },
}
