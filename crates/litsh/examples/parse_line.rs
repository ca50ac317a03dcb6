//! Parse RUN: lines and print their trees
//!
//! Run with: cargo run --example parse_line -- "echo hi | grep h && rm *.o"
//!
//! With no arguments a few sample lines are parsed instead.

use litsh::{parse_with, ParseOptions};

const SAMPLES: &[&str] = &[
    "%clang -c %s -o %t.o 2>&1 | FileCheck %s",
    "not %t.exe 'unterminated",
    "rm -f %t* && echo done > %t.log",
];

fn main() -> anyhow::Result<()> {
    let lines: Vec<String> = std::env::args().skip(1).collect();
    let lines: Vec<&str> = if lines.is_empty() {
        SAMPLES.to_vec()
    } else {
        lines.iter().map(String::as_str).collect()
    };

    let options = ParseOptions::new().pipefail(true);

    for line in lines {
        println!("line: {line}");

        let parsed = parse_with(line, &options)?;
        for warning in &parsed.warnings {
            println!("  warning: {warning}");
        }

        println!("{}", serde_json::to_string_pretty(&parsed.node)?);

        // Not every tree has a shell rendering; quoting can fail.
        match parsed.node.to_shell(true) {
            Ok(rendered) => println!("rendered:\n  {rendered}"),
            Err(e) => println!("rendered: <{e}>"),
        }
        println!();
    }

    Ok(())
}
