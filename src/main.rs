use std::env;

use eclsum_reader::{open, read_rows, Smspec};

/// Dump the arrays of an Eclipse binary file, or, given a specification
/// and a data file, print the summary matrix.
///
/// Usage:
///   eclsum-reader FILE
///   eclsum-reader CASE.SMSPEC CASE.UNSMRY
fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    match args.as_slice() {
        [path] => dump_arrays(path),
        [smspec, datafile] => dump_summary(smspec, datafile),
        _ => {
            eprintln!("usage: eclsum-reader FILE");
            eprintln!("       eclsum-reader CASE.SMSPEC CASE.UNSMRY");
            std::process::exit(2);
        }
    }
}

fn dump_arrays(path: &str) {
    let mut arrays = open(path).expect("Failed to open file");

    loop {
        let array = arrays.next_array().expect("Failed to read array");
        let array = match array {
            Some(array) => array,
            None => break,
        };
        println!(
            "{} {} x{} ({} bytes)",
            array.name_str(),
            array.tag,
            array.count,
            array.body.len()
        );
    }
}

fn dump_summary(smspec: &str, datafile: &str) {
    let spec = Smspec::load(smspec).expect("Failed to load specification");
    let plan = spec.columns(":");

    if let Some(system) = spec.unit_system {
        println!("unit system: {}", system.name());
    }
    if let Some(simulator) = spec.simulator {
        println!("simulator: {}", simulator.name());
    }
    println!("nlist: {}, selected columns: {}", spec.nlist, plan.len());

    let mut arrays = open(datafile).expect("Failed to open data file");
    let mut matrix: Vec<u8> = Vec::new();
    let rows = read_rows(&mut arrays, &plan, |rows| {
        matrix.resize(rows * plan.row_size(), 0);
        Ok(matrix.as_mut_slice())
    })
    .expect("Failed to read summary rows");
    println!("rows: {}", rows);

    print!("REPORT MINI");
    for name in &plan.names {
        print!(" {}", name);
    }
    println!();

    for row in matrix.chunks_exact(plan.row_size()) {
        let report = i32::from_ne_bytes(row[0..4].try_into().unwrap());
        let mini = i32::from_ne_bytes(row[4..8].try_into().unwrap());
        print!("{:6} {:4}", report, mini);
        for value in row[8..].chunks_exact(4) {
            let value = f32::from_ne_bytes(value.try_into().unwrap());
            print!(" {}", value);
        }
        println!();
    }
}
