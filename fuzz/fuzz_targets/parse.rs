#![no_main]

use libfuzzer_sys::fuzz_target;
use syncmock_syntax::{lexer, parser};

fuzz_target!(|data: &[u8]| {
    // Go sources are UTF-8; anything else is rejected before the lexer
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(tokens) = lexer::lex(s) {
            // Declarations only: bodies are skipped as balanced runs, which is where unbalanced input bites
            let _ = parser::parse(&tokens);
        }
    }
});
