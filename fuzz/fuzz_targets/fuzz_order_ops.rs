#![no_main]

use launchdeck::config::order::{self, MoveDirection};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Interpret the input as a starting length plus a stream of reorder
    // commands and check the permutation invariant after every operation.
    let mut bytes = data.iter().copied();
    let Some(len) = bytes.next() else { return };
    let len = usize::from(len % 32);

    let mut keys: Vec<String> = (0..len).map(|i| format!("k{i}")).collect();
    let mut sorted = keys.clone();
    sorted.sort();

    while let (Some(op), Some(a), Some(b)) = (bytes.next(), bytes.next(), bytes.next()) {
        let key_a = format!("k{}", a % 64);
        let key_b = format!("k{}", b % 64);
        match op % 6 {
            0 => {
                order::move_to_position(&mut keys, usize::from(a), usize::from(b));
            }
            1 => {
                order::move_relative(&mut keys, &key_a, MoveDirection::Top);
            }
            2 => {
                order::move_relative(&mut keys, &key_a, MoveDirection::Up);
            }
            3 => {
                order::move_relative(&mut keys, &key_a, MoveDirection::Down);
            }
            4 => {
                order::move_relative(&mut keys, &key_a, MoveDirection::Bottom);
            }
            _ => {
                order::drop_at(&mut keys, &key_a, Some(&key_b), a % 2 == 0);
            }
        }

        let mut now = keys.clone();
        now.sort();
        assert_eq!(now, sorted, "reorder must preserve the key set");
    }
});
