//! Criterion benchmarks for the scanner hot path.
//!
//! Run with: `cargo bench --package rotor_core`

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};

use rotor_core::scanner::{Context, Scanner, Token};

/// Operator-dense input exercising the punctuator trie.
const OPERATORS: &str = "\
a += b -= c *= d %= f **= g;
x === y !== z == w != v;
a && b || !c;
a & b | c ^ d ~ e;
a << 2 >> 3 >>> 4 <<< 5;
i++; j--; k => k;
...rest
";

/// Keyword-dense input exercising the keyword trie.
const KEYWORDS: &str = "\
function f() { return typeof this instanceof x; }
for (var i in xs) { while (true) { break; } continue; }
try { throw new Error(); } catch (e) { } finally { }
class C extends B { static m() { return super.m(); } }
import x from y; export default null;
let implements; async function g() { await yield; }
";

/// Literal-dense input exercising the numeric and string sublexers.
const LITERALS: &str = "\
0xdeadBEAF 0b1010 0o777 1234 3.14159 6.02e23 .5 123n;
'single' \"double\" 'with \\t escapes \\u{1F600}';
/[a-z]+/gi;
";

/// A small function mixing every token class.
const MIXED: &str = "\
// summing helper
function sum(xs) {
    let total = 0;
    for (let i = 0; i < xs.length; i++) {
        total += xs[i] * 2 ** 3;
    }
    /* render */
    return 'total: ' + total;
}
";

fn scan_to_end(input: &[u32]) -> u32 {
    let mut scanner = Scanner::new(input);
    let mut count = 0;
    loop {
        // Expression context throughout; the corpora avoid ambiguous
        // slashes except the regexp line, which wants Expression anyway.
        let t = scanner.next(Context::Expression);
        if t == Token::End {
            return count;
        }
        count += 1;
    }
}

fn bench_corpus(c: &mut Criterion, name: &str, src: &str) {
    let input: Vec<u32> = src.chars().map(|ch| ch as u32).collect();
    let mut group = c.benchmark_group("scanner");
    group.throughput(Throughput::Elements(input.len() as u64));
    group.bench_function(name, |b| {
        b.iter(|| scan_to_end(black_box(&input)));
    });
    group.finish();
}

fn bench_operators(c: &mut Criterion) {
    bench_corpus(c, "operators", OPERATORS);
}

fn bench_keywords(c: &mut Criterion) {
    bench_corpus(c, "keywords", KEYWORDS);
}

fn bench_literals(c: &mut Criterion) {
    bench_corpus(c, "literals", LITERALS);
}

fn bench_mixed(c: &mut Criterion) {
    bench_corpus(c, "mixed", MIXED);
}

criterion_group!(
    benches,
    bench_operators,
    bench_keywords,
    bench_literals,
    bench_mixed,
);
criterion_main!(benches);
