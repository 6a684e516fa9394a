use criterion::*;
use insider_spider::stock::sec::ownership::{build_rows, parse};
use std::fs::File;
use std::io::Read;

const URL: &str = "https://www.sec.gov/Archives/edgar/data/320193/000121412823000012/wf-form4_167329.xml";

// read an xml file to a string
#[inline]
fn read_file_to_string(path: &str) -> String {
    let mut file = File::open(path)
        .map_err(|err| {
            println!("Unable to open file: {:?}", err);
            err
        })
        .unwrap();
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .expect("Unable to read file");
    contents
}

// parse a Form 4 (from a string)
// ----------------------------------------------------------
fn benchmark_parse(c: &mut Criterion) {
    let body = read_file_to_string("./tests/fixtures/form4_doe.xml");

    c.bench_function("parse form 4", |b| {
        b.iter(|| {
            let _doc = parse(black_box(URL), black_box(&body)).expect("form 4 parses");
        })
    });
}

// derive rows from a parsed Form 4
// ----------------------------------------------------------
fn benchmark_rows(c: &mut Criterion) {
    let body = read_file_to_string("./tests/fixtures/form4_doe.xml");
    let doc = parse(URL, &body).expect("form 4 parses");

    c.bench_function("build form 4 rows", |b| {
        b.iter(|| {
            let _rows = build_rows(black_box(&doc));
        })
    });
}

// reject a document that is not an ownership filing
// ----------------------------------------------------------
fn benchmark_reject(c: &mut Criterion) {
    let body = read_file_to_string("./tests/fixtures/xbrl_10q.xml");

    c.bench_function("reject xbrl", |b| {
        b.iter(|| {
            let _err = parse(black_box(URL), black_box(&body)).unwrap_err();
        })
    });
}

criterion_group!(benches, benchmark_parse, benchmark_rows, benchmark_reject);
criterion_main!(benches);
