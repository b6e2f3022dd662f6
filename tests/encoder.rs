mod tests {
    use heapless::Vec;
    use myrtio_strip_encoder::{
        BitOrder, BytesEncoder, EncodeOutcome, EncodePhase, Encoder, LedTimings, StripEncoder,
        Symbol, SymbolBlock, TimingConfig,
    };

    const PAYLOAD: [u8; 3] = [0x00, 0xFF, 0x5A];

    fn timing() -> TimingConfig {
        TimingConfig::new(10_000_000, &LedTimings::WS2812).unwrap()
    }

    /// Run `encoder` to completion through a block of `limit` symbols
    fn drain(
        encoder: &mut StripEncoder,
        payload: &[u8],
        limit: usize,
    ) -> (Vec<Symbol, 128>, Vec<EncodeOutcome, 128>) {
        let mut wire = Vec::new();
        let mut outcomes = Vec::new();
        let mut block = SymbolBlock::<64>::new(limit);
        loop {
            let outcome = encoder.encode(&mut block, payload).unwrap();
            wire.extend_from_slice(block.as_slice()).unwrap();
            block.clear();
            outcomes.push(outcome).unwrap();
            if outcome.is_completed() {
                return (wire, outcomes);
            }
        }
    }

    #[test]
    fn test_every_byte_maps_msb_first() {
        let timing = timing();
        let encoder = BytesEncoder::from_timing(&timing, BitOrder::MsbFirst);

        for byte in 0..=u8::MAX {
            let symbols = encoder.encode_byte(byte);
            for (position, symbol) in symbols.iter().enumerate() {
                let expected = if byte & (0x80 >> position) != 0 {
                    timing.bit1()
                } else {
                    timing.bit0()
                };
                assert_eq!(*symbol, expected, "byte {byte:#04x} bit {position}");
            }
        }
    }

    #[test]
    fn test_unbounded_buffer_completes_in_one_call() {
        let timing = timing();
        let mut encoder = StripEncoder::new(&timing, BitOrder::MsbFirst);
        let (wire, outcomes) = drain(&mut encoder, &PAYLOAD, 64);

        assert_eq!(outcomes.as_slice(), &[EncodeOutcome::Completed(25)]);
        assert_eq!(wire.len(), 25);
        assert_eq!(wire[24], timing.reset_code());
        assert_eq!(&wire[..8], &[timing.bit0(); 8]);
        assert_eq!(&wire[8..16], &[timing.bit1(); 8]);
    }

    #[test]
    fn test_single_symbol_buffer_yields_per_symbol() {
        let timing = timing();
        let mut reference = StripEncoder::new(&timing, BitOrder::MsbFirst);
        let (expected, _) = drain(&mut reference, &PAYLOAD, 64);

        let mut encoder = StripEncoder::new(&timing, BitOrder::MsbFirst);
        let (wire, outcomes) = drain(&mut encoder, &PAYLOAD, 1);

        assert_eq!(outcomes.len(), 8 * PAYLOAD.len() + 1);
        let (last, yielded) = outcomes.split_last().unwrap();
        assert_eq!(*last, EncodeOutcome::Completed(1));
        assert!(yielded.iter().all(|outcome| *outcome == EncodeOutcome::Yielded(1)));
        assert_eq!(wire, expected);
    }

    #[test]
    fn test_any_buffer_size_gives_same_pulse_train() {
        let timing = timing();
        let mut reference = StripEncoder::new(&timing, BitOrder::MsbFirst);
        let (expected, _) = drain(&mut reference, &PAYLOAD, 64);

        for limit in 1..=26 {
            let mut encoder = StripEncoder::new(&timing, BitOrder::MsbFirst);
            let (wire, outcomes) = drain(&mut encoder, &PAYLOAD, limit);
            assert_eq!(wire, expected, "limit {limit}");
            let total: usize = outcomes.iter().map(|outcome| outcome.symbols()).sum();
            assert_eq!(total, 25, "limit {limit}");
        }
    }

    #[test]
    fn test_outcome_counts_are_per_call() {
        let timing = timing();
        let mut encoder = StripEncoder::new(&timing, BitOrder::MsbFirst);
        let (_, outcomes) = drain(&mut encoder, &PAYLOAD, 10);

        assert_eq!(
            outcomes.as_slice(),
            &[
                EncodeOutcome::Yielded(10),
                EncodeOutcome::Yielded(10),
                EncodeOutcome::Completed(5),
            ]
        );
    }

    #[test]
    fn test_never_completes_with_data_left() {
        let timing = timing();
        let mut encoder = StripEncoder::new(&timing, BitOrder::MsbFirst);
        let mut block = SymbolBlock::<64>::new(7);
        let mut queued = 0;

        loop {
            let outcome = encoder.encode(&mut block, &PAYLOAD).unwrap();
            queued += block.len();
            block.clear();
            if outcome.is_completed() {
                assert_eq!(queued, 8 * PAYLOAD.len() + 1);
                break;
            }
            if queued < 8 * PAYLOAD.len() {
                assert_eq!(encoder.phase(), EncodePhase::SendingPixelData);
            }
        }
        assert_eq!(encoder.phase(), EncodePhase::SendingPixelData);
    }

    #[test]
    fn test_data_exactly_fills_buffer() {
        let timing = timing();
        let mut encoder = StripEncoder::new(&timing, BitOrder::MsbFirst);
        let mut block = SymbolBlock::<64>::new(24);

        assert_eq!(
            encoder.encode(&mut block, &PAYLOAD).unwrap(),
            EncodeOutcome::Yielded(24)
        );
        assert_eq!(encoder.phase(), EncodePhase::SendingResetSymbol);

        block.clear();
        assert_eq!(
            encoder.encode(&mut block, &PAYLOAD).unwrap(),
            EncodeOutcome::Completed(1)
        );
    }

    #[test]
    fn test_sessions_are_independent() {
        let timing = timing();
        let mut encoder = StripEncoder::new(&timing, BitOrder::MsbFirst);
        let (first, _) = drain(&mut encoder, &PAYLOAD, 5);
        let (second, _) = drain(&mut encoder, &PAYLOAD, 5);
        assert_eq!(first, second);
    }

    #[test]
    fn test_reset_mid_session_restarts_frame() {
        let timing = timing();
        let mut encoder = StripEncoder::new(&timing, BitOrder::MsbFirst);
        let mut block = SymbolBlock::<64>::new(10);
        encoder.encode(&mut block, &PAYLOAD).unwrap();
        assert_eq!(encoder.progress(), (1, 2));

        encoder.reset();
        let (wire, _) = drain(&mut encoder, &PAYLOAD, 64);

        let mut reference = StripEncoder::new(&timing, BitOrder::MsbFirst);
        let (expected, _) = drain(&mut reference, &PAYLOAD, 64);
        assert_eq!(wire, expected);
    }

    #[test]
    fn test_empty_payload_sends_only_latch() {
        let timing = timing();
        let mut encoder = StripEncoder::new(&timing, BitOrder::MsbFirst);
        let (wire, outcomes) = drain(&mut encoder, &[], 64);
        assert_eq!(outcomes.as_slice(), &[EncodeOutcome::Completed(1)]);
        assert_eq!(wire.as_slice(), &[timing.reset_code()]);
    }
}
