//! Reference builds for unit tests.

use std::collections::BTreeMap;

use crate::domain::entities::*;
use crate::domain::value_objects::{CoolingKind, StorageKind};

/// Ryzen 5 7600 / B650 / 32 GB DDR5 / 750 W Gold / Meshify 2, no GPU.
pub(crate) fn baseline_build() -> Build {
    Build {
        cpu: CpuSpec {
            model: "Ryzen 5 7600".into(),
            brand: "amd".into(),
            socket: "AM5".into(),
            cores: 6,
            threads: 12,
            base_clock_ghz: 3.8,
            boost_clock_ghz: Some(5.1),
            tdp_w: 65,
            integrated_graphics: true,
            price_usd: 229.99,
        },
        gpu: None,
        motherboard: MotherboardSpec {
            model: "MSI B650 TOMAHAWK".into(),
            chipset: "B650".into(),
            socket: "AM5".into(),
            form_factor: "ATX".into(),
            ram_type: "DDR5".into(),
            ram_slots: 4,
            max_ram_gb: 128,
            m2_slots: 2,
            sata_ports: 4,
            pcie_slots: BTreeMap::from([("x16".into(), 1), ("x1".into(), 2)]),
            price_usd: 219.99,
        },
        ram: RamSpec {
            capacity_gb: 32,
            ram_type: "DDR5".into(),
            speed_mhz: 6000,
            modules: 2,
            cas_latency: Some(30),
            price_usd: 109.99,
        },
        storage: vec![nvme(1.0, 89.99)],
        psu: PsuSpec {
            model: "Corsair RM750e".into(),
            wattage: 750,
            efficiency: "80+ Gold".into(),
            modular: "full".into(),
            form_factor: "ATX".into(),
            pcie_connectors: Some(BTreeMap::from([("8-pin".into(), 4), ("6-pin".into(), 2)])),
            price_usd: 99.99,
        },
        cooling: CoolingSpec {
            kind: CoolingKind::Air,
            model: "Thermalright Peerless Assassin 120".into(),
            tdp_rating_w: 220,
            height_mm: Some(155),
            radiator_size_mm: None,
            fan_count: 2,
            noise_level_db: Some(25.6),
            price_usd: 39.99,
        },
        chassis: ChassisSpec {
            model: "Fractal Meshify 2".into(),
            form_factor: "Mid-Tower".into(),
            motherboard_support: vec!["Mini-ITX".into(), "Micro-ATX".into(), "ATX".into()],
            max_gpu_length_mm: Some(315),
            max_cpu_cooler_height_mm: Some(185),
            radiator_support: Some(vec![240, 280, 360]),
            included_fans: 3,
            color: Some("black".into()),
            price_usd: 119.99,
        },
        additional_storage: Vec::new(),
        case_fans: None,
        peripherals: Vec::new(),
        estimated_cost_usd: 909.93,
        estimated_tdp_w: None,
        rationale: None,
    }
}

pub(crate) fn nvme(capacity_tb: f64, price_usd: f64) -> StorageSpec {
    StorageSpec {
        kind: StorageKind::Nvme,
        capacity_tb,
        interface: "PCIe 4.0 x4".into(),
        read_speed_mbps: Some(7000),
        write_speed_mbps: Some(6000),
        form_factor: Some("M.2 2280".into()),
        price_usd,
    }
}

pub(crate) fn sata(kind: StorageKind) -> StorageSpec {
    StorageSpec {
        kind,
        capacity_tb: 2.0,
        interface: "SATA III".into(),
        read_speed_mbps: None,
        write_speed_mbps: None,
        form_factor: Some("2.5\"".into()),
        price_usd: 79.99,
    }
}

pub(crate) fn gpu(tdp_w: u32, length_mm: u32) -> GpuSpec {
    GpuSpec {
        model: "GeForce RTX 4070 Ti".into(),
        brand: "nvidia".into(),
        chipset: "AD104".into(),
        vram_gb: 12,
        vram_type: "GDDR6X".into(),
        tdp_w,
        length_mm: Some(length_mm),
        pcie_slots: 2,
        power_connectors: Some("2x 8-pin".into()),
        price_usd: 749.99,
    }
}

pub(crate) fn constraints() -> Constraints {
    Constraints::builder(1500.0)
        .workload("gaming")
        .build()
        .unwrap_or_else(|e| panic!("fixture constraints invalid: {e}"))
}
