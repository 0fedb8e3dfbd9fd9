use std::io::{self, BufWriter, Write};
use std::process;

const USAGE: &str = "usage: make-pairs [ITERATIONS]";

fn main() -> io::Result<()> {
    let iterations = match std::env::args().nth(1) {
        None => 10_000,
        Some(arg) => arg.parse::<usize>().unwrap_or_else(|_| {
            eprintln!("{}\ninvalid iteration count {:?}", USAGE, arg);
            process::exit(2);
        }),
    };

    let names = [
        ("MARTHA", "MARHTA"),
        ("DWAYNE", "DUANE"),
        ("DIXON", "DICKSONX"),
    ];

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for i in 0..iterations {
        for (left, right) in &names {
            writeln!(out, "{}{}\t{}{}", left, i % 100, right, i % 7)?;
        }
    }

    out.flush()
}
