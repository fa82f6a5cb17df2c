//! Target device resolution.

use tracing::{debug, warn};

use crate::error::DeviceError;
use crate::types::{DeviceRecord, ProxyStatus, REDACTION_MARKER};

/// Remove every redaction marker from a serial number.
pub fn normalize_serial(serial: &str) -> String {
    serial.replace(REDACTION_MARKER, "")
}

/// Select the device a command should target.
///
/// The connection check runs before selection. With a `family` the first
/// device of that family wins; without one the first device in snapshot order
/// is used.
pub fn resolve(status: &ProxyStatus, family: Option<&str>) -> Result<DeviceRecord, DeviceError> {
    if !status.connected {
        return Err(DeviceError::NotConnected);
    }

    let devices = &status.devices.list;
    if devices.is_empty() {
        return Err(DeviceError::NoDeviceFound(
            "device snapshot is empty".to_string(),
        ));
    }

    let selected = match family {
        Some(f) => devices
            .iter()
            .find(|d| d.family == f)
            .ok_or_else(|| DeviceError::NoDeviceFound(format!("no {} device", f)))?,
        None => &devices[0],
    };

    if selected.is_masked() {
        // The proxy masks serials for display; commands need the full value.
        warn!(
            device = %selected.display_name(),
            serial = %selected.serial_number,
            "serial number is masked, stripping redaction markers"
        );
    }

    let device = DeviceRecord {
        serial_number: normalize_serial(&selected.serial_number),
        ..selected.clone()
    };

    debug!(
        device = %device.display_name(),
        device_type = %device.device_type,
        "resolved target device"
    );

    Ok(device)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DeviceList;

    fn device(family: &str, serial: &str, name: &str) -> DeviceRecord {
        DeviceRecord {
            family: family.to_string(),
            device_type: format!("{}-TYPE", family),
            serial_number: serial.to_string(),
            friendly_name: name.to_string(),
        }
    }

    fn snapshot(connected: bool, list: Vec<DeviceRecord>) -> ProxyStatus {
        ProxyStatus {
            connected,
            devices: DeviceList { list },
        }
    }

    #[test]
    fn test_picks_first_matching_family() {
        let status = snapshot(
            true,
            vec![
                device("TABLET", "T1", "Fire"),
                device("ECHO", "G090...AB12", "Kitchen"),
                device("ECHO", "G091", "Bedroom"),
            ],
        );

        let resolved = resolve(&status, Some("ECHO")).unwrap();
        assert_eq!(resolved.friendly_name, "Kitchen");
        assert_eq!(resolved.serial_number, "G090AB12");
        assert_eq!(resolved.device_type, "ECHO-TYPE");
    }

    #[test]
    fn test_no_preference_picks_first() {
        let status = snapshot(
            true,
            vec![device("TABLET", "T...1", "Fire"), device("ECHO", "E1", "Kitchen")],
        );

        let resolved = resolve(&status, None).unwrap();
        assert_eq!(resolved.friendly_name, "Fire");
        assert_eq!(resolved.serial_number, "T1");
    }

    #[test]
    fn test_not_connected_checked_first() {
        let status = snapshot(false, vec![device("ECHO", "E1", "Kitchen")]);
        assert_eq!(resolve(&status, Some("ECHO")), Err(DeviceError::NotConnected));

        let status = snapshot(false, vec![]);
        assert_eq!(resolve(&status, None), Err(DeviceError::NotConnected));
    }

    #[test]
    fn test_empty_snapshot_fails() {
        let status = snapshot(true, vec![]);
        assert!(matches!(
            resolve(&status, Some("ECHO")),
            Err(DeviceError::NoDeviceFound(_))
        ));
        assert!(matches!(resolve(&status, None), Err(DeviceError::NoDeviceFound(_))));
    }

    #[test]
    fn test_no_matching_family_fails() {
        let status = snapshot(true, vec![device("TABLET", "T1", "Fire")]);
        assert_eq!(
            resolve(&status, Some("ECHO")),
            Err(DeviceError::NoDeviceFound("no ECHO device".to_string()))
        );
    }

    #[test]
    fn test_normalize_serial_strips_every_marker() {
        assert_eq!(normalize_serial("G0...91...XY"), "G091XY");
        assert_eq!(normalize_serial("G091XY"), "G091XY");
        assert_eq!(normalize_serial("..."), "");
    }
}
