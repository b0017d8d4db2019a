//! Integration tests for the hub class wire contract
//!
//! Covers the three request rows hubctl can send and the decoding of the
//! GetPortStatus response, including the 0x0103 fixture.

use protocol::{
    ControlSetup, DeviceSummary, MatchMode, PortOperation, PortStatusResponse, ProtocolError,
    TargetSelector, USB_CLASS_HUB,
};

fn selector(operation: &str, port: u16) -> TargetSelector {
    TargetSelector {
        bus: 3,
        vendor_id: 0x05e3,
        product_id: 0x0610,
        port,
        operation: PortOperation::parse(operation),
    }
}

mod request_table {
    use super::*;

    #[test]
    fn test_status_row() {
        let setup = selector("status", 4).setup().expect("status has a setup");
        assert_eq!(
            setup,
            ControlSetup {
                request_type: 0xA3,
                request: 0x00,
                value: 0x0000,
                index: 4,
                length: 4,
            }
        );
    }

    #[test]
    fn test_on_row() {
        let setup = selector("on", 2).setup().expect("on has a setup");
        assert_eq!(
            setup,
            ControlSetup {
                request_type: 0x23,
                request: 0x03,
                value: 8,
                index: 2,
                length: 0,
            }
        );
    }

    #[test]
    fn test_off_row() {
        let setup = selector("off", 2).setup().expect("off has a setup");
        assert_eq!(
            setup,
            ControlSetup {
                request_type: 0x23,
                request: 0x01,
                value: 8,
                index: 2,
                length: 0,
            }
        );
    }

    #[test]
    fn test_unknown_keyword_is_a_no_op() {
        assert!(selector("reset", 2).setup().is_none());
        assert!(selector("", 2).setup().is_none());
    }
}

mod status_decoding {
    use super::*;

    #[test]
    fn test_fixture_response() {
        let response = PortStatusResponse::parse(&[0x03, 0x01, 0x00, 0x00]).unwrap();
        let status = response.status;

        assert!(status.connected());
        assert!(status.enabled());
        assert!(!status.over_current());
        assert!(!status.reset());
        assert_eq!(status.link_state(), 0);
        assert!(!status.port_power());
    }

    #[test]
    fn test_powered_port_with_over_current() {
        // Power, over-current, connection
        let response = PortStatusResponse::parse(&[0x09, 0x02, 0x08, 0x00]).unwrap();
        assert!(response.status.connected());
        assert!(response.status.over_current());
        assert!(response.status.port_power());
        assert_eq!(response.change.0, 0x0008);

        let lines = response.status.report_lines();
        assert!(lines.contains(&"Port reports over current condition".to_string()));
        assert!(lines.contains(&"Port is not in the powered off state".to_string()));
    }

    #[test]
    fn test_short_responses_rejected() {
        for len in 0..4 {
            let data = vec![0u8; len];
            assert_eq!(
                PortStatusResponse::parse(&data),
                Err(ProtocolError::ShortRead {
                    expected: 4,
                    actual: len
                })
            );
        }
    }
}

mod matching {
    use super::*;

    fn device(class_code: u8, vendor_id: u16, product_id: u16, bus_number: u8) -> DeviceSummary {
        DeviceSummary {
            class_code,
            vendor_id,
            product_id,
            bus_number,
            port_number: 0,
        }
    }

    #[test]
    fn test_default_mode_is_either() {
        assert_eq!(MatchMode::default(), MatchMode::Either);
    }

    #[test]
    fn test_matching_table() {
        let target = selector("status", 1);
        let cases = [
            (device(USB_CLASS_HUB, 0x05e3, 0x0610, 3), true, true),
            (device(USB_CLASS_HUB, 0x05e3, 0xffff, 3), true, false),
            (device(USB_CLASS_HUB, 0xffff, 0x0610, 3), true, false),
            (device(USB_CLASS_HUB, 0xffff, 0xffff, 3), false, false),
            (device(USB_CLASS_HUB, 0x05e3, 0x0610, 4), false, false),
            (device(0x08, 0x05e3, 0x0610, 3), false, false),
        ];

        for (summary, either, both) in cases {
            assert_eq!(target.matches(&summary, MatchMode::Either), either, "{summary:?}");
            assert_eq!(target.matches(&summary, MatchMode::Both), both, "{summary:?}");
        }
    }
}
