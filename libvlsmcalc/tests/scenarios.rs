use libvlsmcalc::{
    calculate_subnet_info, calculate_subnetting, calculate_supernetting, calculate_vlsm, AddressClass,
    CalcError, CalcOptions, HostRequirement, Ipv4Network,
};
use libvlsmcalc::mask::MaskParseError;


#[test]
fn subnet_info_class_c_private() {
    let info = calculate_subnet_info("192.168.1.0", "24").unwrap();
    assert_eq!("192.168.1.0", info.network_address.to_string());
    assert_eq!("192.168.1.255", info.broadcast_address.to_string());
    assert_eq!("192.168.1.1", info.first_usable.to_string());
    assert_eq!("192.168.1.254", info.last_usable.to_string());
    assert_eq!(254, info.usable_hosts);
    assert_eq!(AddressClass::C, info.class);
    assert!(info.is_private);
}

#[test]
fn subnet_info_point_to_point_and_host() {
    assert_eq!(2, calculate_subnet_info("192.168.1.0", "31").unwrap().usable_hosts);
    assert_eq!(1, calculate_subnet_info("192.168.1.1", "32").unwrap().usable_hosts);
}

#[test]
fn supernetting_four_class_c() {
    let report = calculate_supernetting(&[
        "192.168.0.0/24", "192.168.1.0/24", "192.168.2.0/24", "192.168.3.0/24",
    ]).unwrap();
    assert_eq!("192.168.0.0/22", report.result.to_string());
    assert_eq!(4, report.member_count);
}

#[test]
fn subnetting_into_quarters() {
    let report = calculate_subnetting("192.168.0.0/24", 26, &CalcOptions::default()).unwrap();
    let networks: Vec<String> = report.subnets.iter()
        .map(|s| s.network.to_string())
        .collect();
    assert_eq!(
        vec!["192.168.0.0/26", "192.168.0.64/26", "192.168.0.128/26", "192.168.0.192/26"],
        networks,
    );
    assert!(report.subnets.iter().all(|s| s.usable_hosts == 62));
}

#[test]
fn vlsm_departments() {
    let parent: Ipv4Network = "10.0.0.0/16".parse().unwrap();
    let requirements = vec![
        HostRequirement::new("Engineering", 100),
        HostRequirement::new("Sales", 50),
        HostRequirement::new("Support", 25),
    ];
    let report = calculate_vlsm("10.0.0.0/16", &requirements).unwrap();

    let summary: Vec<(&str, u8, u64)> = report.allocations.iter()
        .map(|a| (a.name.as_str(), a.network.cidr_prefix(), a.usable_hosts))
        .collect();
    assert_eq!(vec![("Engineering", 25, 126), ("Sales", 26, 62), ("Support", 27, 30)], summary);

    for (i, allocation) in report.allocations.iter().enumerate() {
        assert!(parent.is_superset_of(&allocation.network));
        for other in &report.allocations[i+1..] {
            assert!(!allocation.network.intersects(&other.network));
        }
    }
}

#[test]
fn non_contiguous_mask_rejected() {
    assert!(matches!(
        calculate_subnet_info("10.0.0.1", "255.255.0.255"),
        Err(CalcError::Mask(MaskParseError::NonContiguous(_))),
    ));
}

#[cfg(feature = "serde")]
#[test]
fn reports_serialize_as_strings() {
    let info = calculate_subnet_info("172.16.5.4", "255.255.0.0").unwrap();
    let value = serde_json::to_value(&info).unwrap();
    assert_eq!("172.16.5.4", value["address"]);
    assert_eq!(16, value["prefix_length"]);
    assert_eq!("255.255.0.0", value["mask"]);
    assert_eq!("172.16.0.0", value["network_address"]);
    assert_eq!("172.16.255.255", value["broadcast_address"]);
    assert_eq!("172.16.0.1 - 172.16.255.254", value["usable_range"]);
    assert_eq!(65534, value["usable_hosts"]);
    assert_eq!(65536, value["total_hosts"]);
    assert_eq!("B", value["class"]);
    assert_eq!(true, value["is_private"]);
    assert_eq!("0.0.255.255", value["wildcard_mask"]);
    assert_eq!("172.16.0.0/16", value["network"]);

    let report = calculate_vlsm("10.0.0.0/24", &[HostRequirement::new("", 60)]).unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!("Subnet 1", value["allocations"][0]["name"]);
    assert_eq!("10.0.0.0/26", value["allocations"][0]["network"]);
    assert_eq!(serde_json::json!(["10.0.0.64/26", "10.0.0.128/25"]), value["unallocated"]);
}
