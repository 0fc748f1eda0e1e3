#![no_main]

use libfuzzer_sys::fuzz_target;
use rotor_core::scanner::{Context, Scanner, Token};

fuzz_target!(|data: &[u8]| {
    // Only process valid UTF-8.
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };

    // Limit input size to avoid timeouts.
    if source.len() > 100_000 {
        return;
    }

    let input: Vec<u32> = source.chars().map(|c| c as u32).collect();

    // Rotate through every context; the scanner must make progress and keep
    // spans monotonic no matter what the caller claims about the grammar.
    let contexts = [Context::Expression, Context::Div, Context::TemplateString];
    let mut scanner = Scanner::new(&input);
    let mut last_end = 0u32;
    let mut step = 0usize;
    loop {
        let t = scanner.next(contexts[step % contexts.len()]);
        step += 1;

        let r = scanner.result();
        assert!(r.start <= r.end, "span inverted");
        assert!(last_end <= r.start, "spans moved backwards");
        assert!(r.end as usize <= input.len(), "span past end of input");
        last_end = r.end;

        match t {
            Token::End => {
                assert_eq!(r.start as usize, input.len());
                assert_eq!(r.end as usize, input.len());
                break;
            }
            // The usual caller policy: stop at the first hard error.
            Token::Error => {
                assert!(r.error.is_some(), "error token without a cause");
                break;
            }
            _ => {}
        }
    }
});
