//! Device listing, grouped by room.

use tabled::Tabled;

use roomsense_core::handler;
use roomsense_core::{DeviceGroups, ServiceConfig, Update};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Room")]
    room: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    device_type: String,
}

fn device_rows(groups: &DeviceGroups) -> Vec<DeviceRow> {
    groups
        .iter()
        .flat_map(|(room, devices)| {
            devices.iter().map(move |d| DeviceRow {
                room: if room.is_empty() { "-".into() } else { room.clone() },
                id: d.id.clone(),
                name: d.name.clone().unwrap_or_default(),
                device_type: d.device_type.clone().unwrap_or_default(),
            })
        })
        .collect()
}

pub async fn handle(service: &ServiceConfig, global: &GlobalOpts) -> Result<(), CliError> {
    let client = service.build_client()?;

    let groups = match handler::fetch_devices(&client).await? {
        Update::Devices { devices } => devices,
        other => {
            return Err(CliError::Internal(format!(
                "expected setDevices, got {}",
                other.action_type()
            )));
        }
    };

    let out = output::render(&global.output, &groups, device_rows)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use roomsense_core::{DeviceDescriptor, convert};

    use super::*;

    #[test]
    fn rows_follow_room_order() {
        let mut sensor = DeviceDescriptor::new("t1", "kitchen");
        sensor.name = Some("Kitchen temp".into());
        let groups = convert::group_by_room(vec![
            sensor,
            DeviceDescriptor::new("m1", ""),
            DeviceDescriptor::new("t2", "kitchen"),
        ]);

        let rows = device_rows(&groups);
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["t1", "t2", "m1"]);
        assert_eq!(rows[0].name, "Kitchen temp");
        assert_eq!(rows[2].room, "-");
    }
}
