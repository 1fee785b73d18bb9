//! Component identifier ("xname") grammar.
//!
//! An xname encodes the physical location of a component, e.g. `x3000c0s19b1n0`
//! is node 0 behind BMC 1 in slot 19 of chassis 0 in cabinet 3000. Only the
//! syntax is checked here; whether the component exists is the inventory
//! service's business.

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    System,
    Cdu,
    CduMgmtSwitch,
    Cabinet,
    CabinetCdu,
    CabinetBmc,
    CabinetPduController,
    CabinetPdu,
    CabinetPduOutlet,
    CabinetPduPowerConnector,
    Cec,
    Chassis,
    ChassisBmc,
    CmmRectifier,
    CmmFpga,
    MgmtSwitch,
    MgmtSwitchConnector,
    MgmtHlSwitchEnclosure,
    MgmtHlSwitch,
    ComputeModule,
    NodeEnclosure,
    NodeEnclosurePowerSupply,
    NodePowerConnector,
    NodeBmc,
    NodeBmcNic,
    Node,
    Processor,
    NodeNic,
    NodeHsnNic,
    Memory,
    NodeAccel,
    NodeAccelRiser,
    StorageGroup,
    Drive,
    RouterModule,
    RouterBmc,
    RouterBmcNic,
    RouterFpga,
    RouterTor,
    RouterTorFpga,
    HsnBoard,
    HsnAsic,
    HsnLink,
    HsnConnector,
    HsnConnectorPort,
}

const PATTERNS: &[(ComponentType, &str)] = &[
    (ComponentType::System, r"s0"),
    (ComponentType::Cdu, r"d\d+"),
    (ComponentType::CduMgmtSwitch, r"d\d+w\d+"),
    (ComponentType::Cabinet, r"x\d{1,4}"),
    (ComponentType::CabinetCdu, r"x\d{1,4}d\d+"),
    (ComponentType::CabinetBmc, r"x\d{1,4}b\d+"),
    (ComponentType::CabinetPduController, r"x\d{1,4}m\d+"),
    (ComponentType::CabinetPdu, r"x\d{1,4}m\d+p\d+"),
    (ComponentType::CabinetPduOutlet, r"x\d{1,4}m\d+p\d+j\d+"),
    (ComponentType::CabinetPduPowerConnector, r"x\d{1,4}m\d+p\d+v\d+"),
    (ComponentType::Cec, r"x\d{1,4}e\d+"),
    (ComponentType::Chassis, r"x\d{1,4}c[0-7]"),
    (ComponentType::ChassisBmc, r"x\d{1,4}c[0-7]b\d+"),
    (ComponentType::CmmRectifier, r"x\d{1,4}c[0-7]t\d+"),
    (ComponentType::CmmFpga, r"x\d{1,4}c[0-7]f\d+"),
    (ComponentType::MgmtSwitch, r"x\d{1,4}c[0-7]w\d+"),
    (ComponentType::MgmtSwitchConnector, r"x\d{1,4}c[0-7]w\d+j\d+"),
    (ComponentType::MgmtHlSwitchEnclosure, r"x\d{1,4}c[0-7]h\d+"),
    (ComponentType::MgmtHlSwitch, r"x\d{1,4}c[0-7]h\d+s\d+"),
    (ComponentType::ComputeModule, r"x\d{1,4}c[0-7]s\d+"),
    (ComponentType::NodeEnclosure, r"x\d{1,4}c[0-7]s\d+e\d+"),
    (ComponentType::NodeEnclosurePowerSupply, r"x\d{1,4}c[0-7]s\d+e\d+t\d+"),
    (ComponentType::NodePowerConnector, r"x\d{1,4}c[0-7]s\d+v\d+"),
    (ComponentType::NodeBmc, r"x\d{1,4}c[0-7]s\d+b\d+"),
    (ComponentType::NodeBmcNic, r"x\d{1,4}c[0-7]s\d+b\d+i\d+"),
    (ComponentType::Node, r"x\d{1,4}c[0-7]s\d+b\d+n\d+"),
    (ComponentType::Processor, r"x\d{1,4}c[0-7]s\d+b\d+n\d+p\d+"),
    (ComponentType::NodeNic, r"x\d{1,4}c[0-7]s\d+b\d+n\d+i\d+"),
    (ComponentType::NodeHsnNic, r"x\d{1,4}c[0-7]s\d+b\d+n\d+h\d+"),
    (ComponentType::Memory, r"x\d{1,4}c[0-7]s\d+b\d+n\d+d\d+"),
    (ComponentType::NodeAccel, r"x\d{1,4}c[0-7]s\d+b\d+n\d+a\d+"),
    (ComponentType::NodeAccelRiser, r"x\d{1,4}c[0-7]s\d+b\d+n\d+r\d+"),
    (ComponentType::StorageGroup, r"x\d{1,4}c[0-7]s\d+b\d+n\d+g\d+"),
    (ComponentType::Drive, r"x\d{1,4}c[0-7]s\d+b\d+n\d+g\d+k\d+"),
    (ComponentType::RouterModule, r"x\d{1,4}c[0-7]r\d+"),
    (ComponentType::RouterBmc, r"x\d{1,4}c[0-7]r\d+b\d+"),
    (ComponentType::RouterBmcNic, r"x\d{1,4}c[0-7]r\d+b\d+i\d+"),
    (ComponentType::RouterFpga, r"x\d{1,4}c[0-7]r\d+f\d+"),
    (ComponentType::RouterTor, r"x\d{1,4}c[0-7]r\d+t\d+"),
    (ComponentType::RouterTorFpga, r"x\d{1,4}c[0-7]r\d+t\d+f\d+"),
    (ComponentType::HsnBoard, r"x\d{1,4}c[0-7]r\d+e\d+"),
    (ComponentType::HsnAsic, r"x\d{1,4}c[0-7]r\d+a\d+"),
    (ComponentType::HsnLink, r"x\d{1,4}c[0-7]r\d+a\d+l\d+"),
    (ComponentType::HsnConnector, r"x\d{1,4}c[0-7]r\d+j\d+"),
    (ComponentType::HsnConnectorPort, r"x\d{1,4}c[0-7]r\d+j\d+p\d+"),
];

lazy_static! {
    static ref XNAME_GRAMMAR: Vec<(ComponentType, Regex)> = PATTERNS
        .iter()
        .map(|(kind, pattern)| (*kind, Regex::new(&format!("(?i)^{}$", pattern)).unwrap()))
        .collect();
}

impl ComponentType {
    /// Classify `xname`, or `None` when it matches no component grammar.
    pub fn parse(xname: &str) -> Option<Self> {
        XNAME_GRAMMAR
            .iter()
            .find(|(_, re)| re.is_match(xname))
            .map(|(kind, _)| *kind)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::System => "System",
            Self::Cdu => "CDU",
            Self::CduMgmtSwitch => "CDUMgmtSwitch",
            Self::Cabinet => "Cabinet",
            Self::CabinetCdu => "CabinetCDU",
            Self::CabinetBmc => "CabinetBMC",
            Self::CabinetPduController => "CabinetPDUController",
            Self::CabinetPdu => "CabinetPDU",
            Self::CabinetPduOutlet => "CabinetPDUOutlet",
            Self::CabinetPduPowerConnector => "CabinetPDUPowerConnector",
            Self::Cec => "CEC",
            Self::Chassis => "Chassis",
            Self::ChassisBmc => "ChassisBMC",
            Self::CmmRectifier => "CMMRectifier",
            Self::CmmFpga => "CMMFpga",
            Self::MgmtSwitch => "MgmtSwitch",
            Self::MgmtSwitchConnector => "MgmtSwitchConnector",
            Self::MgmtHlSwitchEnclosure => "MgmtHLSwitchEnclosure",
            Self::MgmtHlSwitch => "MgmtHLSwitch",
            Self::ComputeModule => "ComputeModule",
            Self::NodeEnclosure => "NodeEnclosure",
            Self::NodeEnclosurePowerSupply => "NodeEnclosurePowerSupply",
            Self::NodePowerConnector => "NodePowerConnector",
            Self::NodeBmc => "NodeBMC",
            Self::NodeBmcNic => "NodeBMCNic",
            Self::Node => "Node",
            Self::Processor => "Processor",
            Self::NodeNic => "NodeNic",
            Self::NodeHsnNic => "NodeHsnNic",
            Self::Memory => "Memory",
            Self::NodeAccel => "NodeAccel",
            Self::NodeAccelRiser => "NodeAccelRiser",
            Self::StorageGroup => "StorageGroup",
            Self::Drive => "Drive",
            Self::RouterModule => "RouterModule",
            Self::RouterBmc => "RouterBMC",
            Self::RouterBmcNic => "RouterBMCNic",
            Self::RouterFpga => "RouterFpga",
            Self::RouterTor => "RouterTOR",
            Self::RouterTorFpga => "RouterTORFpga",
            Self::HsnBoard => "HSNBoard",
            Self::HsnAsic => "HSNAsic",
            Self::HsnLink => "HSNLink",
            Self::HsnConnector => "HSNConnector",
            Self::HsnConnectorPort => "HSNConnectorPort",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[inline]
pub fn is_valid_xname(xname: &str) -> bool {
    ComponentType::parse(xname).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(ComponentType::parse("s0"), Some(ComponentType::System));
        assert_eq!(ComponentType::parse("x3000"), Some(ComponentType::Cabinet));
        assert_eq!(ComponentType::parse("x1000c1"), Some(ComponentType::Chassis));
        assert_eq!(ComponentType::parse("x1000c1b0"), Some(ComponentType::ChassisBmc));
        assert_eq!(ComponentType::parse("x0c0s1b0"), Some(ComponentType::NodeBmc));
        assert_eq!(ComponentType::parse("x0c0s1b0n0"), Some(ComponentType::Node));
        assert_eq!(ComponentType::parse("x3000c0s19b1n0p1"), Some(ComponentType::Processor));
        assert_eq!(ComponentType::parse("x1000c7r3b0"), Some(ComponentType::RouterBmc));
        assert_eq!(ComponentType::parse("x3000m0p1j12"), Some(ComponentType::CabinetPduOutlet));
        assert_eq!(ComponentType::parse("d0w1"), Some(ComponentType::CduMgmtSwitch));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(ComponentType::parse("X0C0S1B0N0"), Some(ComponentType::Node));
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in ["", "foo", "x", "x0c", "x0c0s1b0n", "x0c0s1b0n0z", "s1", "x0c0s1 b0", "x-1", "/x0c0"] {
            assert!(!is_valid_xname(bad), "'{}' should be rejected", bad);
        }
    }

    #[test]
    fn test_cabinet_and_chassis_ranges() {
        assert!(is_valid_xname("x9999c7s0b0n0"));
        assert!(!is_valid_xname("x12345c0s0b0n0"));
        assert!(!is_valid_xname("x12345"));
        assert!(!is_valid_xname("x0c8s0b0n0"));
        assert!(!is_valid_xname("x0c10"));
    }

    #[test]
    fn test_display() {
        assert_eq!(ComponentType::NodeBmc.to_string(), "NodeBMC");
    }
}
