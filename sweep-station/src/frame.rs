use crate::constants::{FRAME_HEADER_BYTE, FRAME_SIZE, MIN_STRENGTH};
use sweep_data::{Measurement, MeasurementOutcome};

pub(crate) fn is_frame_header(element0: u8, element1: u8) -> bool {
    element0 == FRAME_HEADER_BYTE && element1 == FRAME_HEADER_BYTE
}

/// Modular sum of every byte before the trailing checksum byte, header
/// included. A single corrupted byte always changes the low byte of the sum;
/// corruption spread over several bytes can cancel out mod 256.
pub(crate) fn checksum(frame: &[u8; FRAME_SIZE]) -> u8 {
    frame[..FRAME_SIZE - 1]
        .iter()
        .fold(0u8, |sum, byte| sum.wrapping_add(*byte))
}

pub(crate) fn convert_distance(low: u8, high: u8) -> f64 {
    ((high as u16) * 256 + (low as u16)) as f64
}

pub(crate) fn convert_strength(low: u8, high: u8) -> f64 {
    ((high as u16) * 256 + (low as u16)) as f64
}

pub(crate) fn convert_temperature(low: u8, high: u8) -> f64 {
    (((high as u16) * 256 + (low as u16)) as f64) / 8. - 256.
}

/// Decodes one complete sensor frame. The checksum is verified before the
/// strength threshold is applied: the strength field of a corrupt frame
/// cannot be trusted.
pub(crate) fn decode(frame: &[u8; FRAME_SIZE]) -> MeasurementOutcome {
    if checksum(frame) != frame[FRAME_SIZE - 1] {
        return MeasurementOutcome::ChecksumInvalid;
    }

    let strength = convert_strength(frame[4], frame[5]);
    if strength < MIN_STRENGTH {
        return MeasurementOutcome::WeakSignal;
    }

    MeasurementOutcome::Measured(Measurement {
        distance: convert_distance(frame[2], frame[3]),
        strength,
        temperature: convert_temperature(frame[6], frame[7]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FRAME_HEADER_SIZE;

    // distance 10 cm, strength 210, temperature 4 C
    const VALID_FRAME: [u8; FRAME_SIZE] =
        [0x59, 0x59, 0x0A, 0x00, 0xD2, 0x00, 0x20, 0x08, 0xB6];

    #[test]
    fn test_checksum() {
        assert_eq!(checksum(&VALID_FRAME), 0xB6);
        // 8 * 0xFF = 2040, low byte 0xF8
        assert_eq!(checksum(&[0xFF; FRAME_SIZE]), 0xF8);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(convert_distance(0x0A, 0x00), 10.);
        assert_eq!(convert_distance(0x00, 0x01), 256.);
        assert_eq!(convert_strength(0xD2, 0x00), 210.);
        assert_eq!(convert_temperature(0x20, 0x08), 4.);
        assert_eq!(convert_temperature(0x00, 0x00), -256.);
    }

    #[test]
    fn test_decode_valid_frame() {
        let outcome = decode(&VALID_FRAME);
        let expected = Measurement {
            distance: 10.,
            strength: 210.,
            temperature: 4.,
        };
        assert!(matches!(outcome, MeasurementOutcome::Measured(m) if m == expected));
    }

    #[test]
    fn test_decode_weak_signal() {
        // strength 150, below the 200 threshold
        let frame = [0x59, 0x59, 0x0A, 0x00, 0x96, 0x00, 0x20, 0x08, 0x7A];
        assert!(matches!(decode(&frame), MeasurementOutcome::WeakSignal));

        // strength exactly at the threshold is trusted
        let frame = [0x59, 0x59, 0x0A, 0x00, 0xC8, 0x00, 0x20, 0x08, 0xAC];
        assert!(matches!(decode(&frame), MeasurementOutcome::Measured(_)));
    }

    #[test]
    fn test_decode_rejects_any_single_byte_corruption() {
        for index in FRAME_HEADER_SIZE..FRAME_SIZE {
            for delta in [1u8, 0x37, 0x80, 0xFF] {
                let mut frame = VALID_FRAME;
                frame[index] = frame[index].wrapping_add(delta);
                assert!(matches!(
                    decode(&frame),
                    MeasurementOutcome::ChecksumInvalid
                ));
            }
        }
    }

    #[test]
    fn test_decode_checks_checksum_before_strength() {
        // weak strength and a bad checksum must report the checksum fault
        let frame = [0x59, 0x59, 0x0A, 0x00, 0x96, 0x00, 0x20, 0x08, 0x00];
        assert!(matches!(
            decode(&frame),
            MeasurementOutcome::ChecksumInvalid
        ));
    }
}
