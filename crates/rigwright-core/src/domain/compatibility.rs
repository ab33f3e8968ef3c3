//! Physical and electrical compatibility checks.
//!
//! Each check reads one [`Build`] and appends findings to a
//! [`ValidationResult`]. Checks never fail and never short-circuit each
//! other; ordering is fixed by [`crate::domain::validation::CHECKS`].
//!
//! Label comparisons (sockets, RAM types, form factors) ignore ASCII case
//! and surrounding whitespace.

use super::entities::common::same_label;
use super::entities::{
    Build, ErrorDetail, ValidationError, ValidationResult, ValidationWarning, WarningDetail,
};
use super::value_objects::{Component, CoolingKind, Severity};

/// Clearance below which a GPU fit is flagged as tight.
const GPU_TIGHT_MM: u32 = 10;
/// Clearance below which an air cooler fit is flagged as tight.
const COOLER_TIGHT_MM: u32 = 5;
/// Cooler rating should exceed CPU TDP by this factor.
const THERMAL_MARGIN: f64 = 1.2;
/// DDR4 kits above this speed are unusual enough to warn about.
const DDR4_SPEED_LIMIT_MHZ: u32 = 4000;

pub(crate) fn check_socket(build: &Build, result: &mut ValidationResult) {
    let (cpu, board) = (&build.cpu, &build.motherboard);
    if same_label(&cpu.socket, &board.socket) {
        return;
    }

    result.add_error(ValidationError::new(
        &[Component::Cpu, Component::Motherboard],
        format!(
            "CPU socket '{}' does not match motherboard socket '{}'",
            cpu.socket, board.socket
        ),
        ErrorDetail::SocketMismatch {
            cpu_socket: cpu.socket.clone(),
            cpu_model: cpu.model.clone(),
            motherboard_socket: board.socket.clone(),
            motherboard_model: board.model.clone(),
        },
    ));
}

pub(crate) fn check_ram(build: &Build, result: &mut ValidationResult) {
    let (ram, board) = (&build.ram, &build.motherboard);
    let pair = [Component::Ram, Component::Motherboard];

    if !same_label(&ram.ram_type, &board.ram_type) {
        result.add_error(ValidationError::new(
            &pair,
            format!(
                "RAM type '{}' incompatible with motherboard RAM type '{}'",
                ram.ram_type, board.ram_type
            ),
            ErrorDetail::RamTypeMismatch {
                ram_type: ram.ram_type.clone(),
                ram_capacity_gb: ram.capacity_gb,
                motherboard_ram_type: board.ram_type.clone(),
                motherboard_model: board.model.clone(),
            },
        ));
    }

    if ram.capacity_gb > board.max_ram_gb {
        result.add_error(ValidationError::new(
            &pair,
            format!(
                "RAM capacity {}GB exceeds motherboard maximum {}GB",
                ram.capacity_gb, board.max_ram_gb
            ),
            ErrorDetail::RamCapacityExceeded {
                ram_capacity_gb: ram.capacity_gb,
                motherboard_max_gb: board.max_ram_gb,
            },
        ));
    }

    if ram.modules > board.ram_slots {
        result.add_error(ValidationError::new(
            &pair,
            format!(
                "RAM configuration requires {} slots but motherboard only has {}",
                ram.modules, board.ram_slots
            ),
            ErrorDetail::RamSlotsExceeded {
                ram_modules: ram.modules,
                motherboard_slots: board.ram_slots,
            },
        ));
    } else if ram.modules == board.ram_slots {
        result.add_warning(ValidationWarning::new(
            &pair,
            Severity::Low,
            format!(
                "All {} RAM slots used - no upgrade path without replacement",
                board.ram_slots
            ),
            WarningDetail::RamSlotsFull {
                ram_modules: ram.modules,
                motherboard_slots: board.ram_slots,
            },
        ));
    }

    if same_label(&board.ram_type, "DDR4") && ram.speed_mhz > DDR4_SPEED_LIMIT_MHZ {
        result.add_warning(ValidationWarning::new(
            &[Component::Ram],
            Severity::Low,
            format!(
                "RAM speed {}MHz is quite high for DDR4. \
                 Verify motherboard/CPU officially supports this speed.",
                ram.speed_mhz
            ),
            WarningDetail::RamSpeedHigh {
                ram_speed_mhz: ram.speed_mhz,
            },
        ));
    }
}

pub(crate) fn check_form_factor(build: &Build, result: &mut ValidationResult) {
    let (board, chassis) = (&build.motherboard, &build.chassis);
    if chassis.supports_motherboard(&board.form_factor) {
        return;
    }

    result.add_error(ValidationError::new(
        &[Component::Motherboard, Component::Chassis],
        format!(
            "Motherboard form factor '{}' not supported by chassis. Chassis supports: {}",
            board.form_factor,
            chassis.motherboard_support.join(", ")
        ),
        ErrorDetail::FormFactorIncompatible {
            motherboard_form_factor: board.form_factor.clone(),
            chassis_supports: chassis.motherboard_support.clone(),
            chassis_model: chassis.model.clone(),
        },
    ));
}

pub(crate) fn check_gpu_clearance(build: &Build, result: &mut ValidationResult) {
    let Some(gpu) = &build.gpu else { return };
    let chassis = &build.chassis;
    let pair = [Component::Gpu, Component::Chassis];

    if let (Some(length), Some(max)) = (gpu.known_length_mm(), chassis.known_max_gpu_length_mm())
    {
        if length > max {
            result.add_error(ValidationError::new(
                &pair,
                format!("GPU length {length}mm exceeds chassis maximum {max}mm"),
                ErrorDetail::GpuTooLong {
                    gpu_length_mm: length,
                    chassis_max_mm: max,
                    overhang_mm: length - max,
                },
            ));
        } else if max - length < GPU_TIGHT_MM {
            let clearance = max - length;
            result.add_warning(ValidationWarning::new(
                &pair,
                Severity::Medium,
                format!("GPU clearance very tight: only {clearance}mm available"),
                WarningDetail::GpuClearanceTight {
                    gpu_length_mm: length,
                    chassis_max_mm: max,
                    clearance_mm: clearance,
                },
            ));
        }
    }

    if gpu.pcie_slots >= 3 {
        result.add_warning(ValidationWarning::new(
            &[Component::Gpu],
            Severity::Low,
            format!(
                "GPU occupies {} PCIe slots - may limit expansion options",
                gpu.pcie_slots
            ),
            WarningDetail::GpuSlotWidth {
                gpu_pcie_slots: gpu.pcie_slots,
            },
        ));
    }
}

pub(crate) fn check_cooler_clearance(build: &Build, result: &mut ValidationResult) {
    let (cooling, chassis) = (&build.cooling, &build.chassis);
    let pair = [Component::Cooling, Component::Chassis];

    match cooling.kind {
        CoolingKind::Air => {
            let (Some(height), Some(max)) =
                (cooling.known_height_mm(), chassis.known_max_cooler_height_mm())
            else {
                return;
            };

            if height > max {
                result.add_error(ValidationError::new(
                    &pair,
                    format!("CPU cooler height {height}mm exceeds chassis maximum {max}mm"),
                    ErrorDetail::CoolerTooTall {
                        cooler_height_mm: height,
                        chassis_max_mm: max,
                        overhang_mm: height - max,
                    },
                ));
            } else if max - height < COOLER_TIGHT_MM {
                let clearance = max - height;
                result.add_warning(ValidationWarning::new(
                    &pair,
                    Severity::Medium,
                    format!("CPU cooler clearance very tight: only {clearance}mm available"),
                    WarningDetail::CoolerClearanceTight {
                        cooler_height_mm: height,
                        chassis_max_mm: max,
                        clearance_mm: clearance,
                    },
                ));
            }
        }
        CoolingKind::Aio => {
            let Some(radiator) = cooling.known_radiator_mm() else {
                return;
            };

            match chassis.declared_radiators() {
                Some(sizes) if !sizes.contains(&radiator) => {
                    result.add_error(ValidationError::new(
                        &pair,
                        format!(
                            "Chassis does not support {radiator}mm radiator. Supported sizes: {sizes:?}"
                        ),
                        ErrorDetail::RadiatorNotSupported {
                            radiator_size_mm: radiator,
                            chassis_supports: sizes.to_vec(),
                        },
                    ));
                }
                Some(_) => {}
                None => {
                    result.add_warning(ValidationWarning::new(
                        &pair,
                        Severity::High,
                        format!(
                            "Chassis radiator support not specified. \
                             Verify {radiator}mm radiator fitment manually."
                        ),
                        WarningDetail::RadiatorSupportUnknown {
                            radiator_size_mm: radiator,
                        },
                    ));
                }
            }
        }
        CoolingKind::Custom => {}
    }
}

pub(crate) fn check_cooling_capacity(build: &Build, result: &mut ValidationResult) {
    let cpu_tdp = build.cpu.tdp_w;
    let rating = build.cooling.tdp_rating_w;
    let pair = [Component::Cooling, Component::Cpu];

    if rating < cpu_tdp {
        result.add_error(
            ValidationError::new(
                &pair,
                format!(
                    "CPU cooler TDP rating {rating}W insufficient for CPU TDP {cpu_tdp}W"
                ),
                ErrorDetail::CoolingInsufficient {
                    cpu_tdp_w: cpu_tdp,
                    cooler_rating_w: rating,
                    shortfall_w: cpu_tdp - rating,
                },
            )
            .with_extra("cooler_model", build.cooling.model.as_str()),
        );
    } else if f64::from(rating) < f64::from(cpu_tdp) * THERMAL_MARGIN {
        let headroom_pct =
            ((f64::from(rating) - f64::from(cpu_tdp)) / f64::from(cpu_tdp) * 1000.0).round() / 10.0;
        result.add_warning(
            ValidationWarning::new(
                &pair,
                Severity::High,
                format!(
                    "CPU cooler TDP rating {rating}W provides minimal headroom for CPU TDP \
                     {cpu_tdp}W. May run hot under sustained load."
                ),
                WarningDetail::ThermalHeadroomLow {
                    cpu_tdp_w: cpu_tdp,
                    cooler_rating_w: rating,
                    headroom_pct,
                },
            )
            .with_extra("cooler_model", build.cooling.model.as_str()),
        );
    }
}

pub(crate) fn check_storage_connectivity(build: &Build, result: &mut ValidationResult) {
    let board = &build.motherboard;
    let pair = [Component::Storage, Component::Motherboard];

    let m2_required = build.all_storage().filter(|s| s.kind.uses_m2_slot()).count() as u32;
    let sata_required = build
        .all_storage()
        .filter(|s| s.kind.uses_sata_port())
        .count() as u32;

    if m2_required > board.m2_slots {
        result.add_error(ValidationError::new(
            &pair,
            format!(
                "Storage requires {m2_required} M.2 slots but motherboard only has {}",
                board.m2_slots
            ),
            ErrorDetail::InsufficientM2Slots {
                m2_required,
                m2_available: board.m2_slots,
            },
        ));
    } else if m2_required == board.m2_slots && m2_required > 0 {
        result.add_warning(ValidationWarning::new(
            &pair,
            Severity::Low,
            format!(
                "All {} M.2 slots used - no room for expansion",
                board.m2_slots
            ),
            WarningDetail::M2SlotsFull {
                m2_required,
                m2_available: board.m2_slots,
            },
        ));
    }

    if sata_required > board.sata_ports {
        result.add_error(ValidationError::new(
            &pair,
            format!(
                "Storage requires {sata_required} SATA ports but motherboard only has {}",
                board.sata_ports
            ),
            ErrorDetail::InsufficientSataPorts {
                sata_required,
                sata_available: board.sata_ports,
            },
        ));
    }
}

pub(crate) fn check_graphics_output(build: &Build, result: &mut ValidationResult) {
    if build.gpu.is_some() || build.cpu.integrated_graphics {
        return;
    }

    result.add_error(ValidationError::new(
        &[Component::Cpu, Component::Gpu],
        format!(
            "No discrete GPU specified and CPU '{}' lacks integrated graphics. \
             System will have no video output.",
            build.cpu.model
        ),
        ErrorDetail::MissingGpu {
            cpu_model: build.cpu.model.clone(),
            cpu_has_igpu: build.cpu.integrated_graphics,
        },
    ));
}
