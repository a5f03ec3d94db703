// Host-side tests for the WGSL light-field shader: it must parse, validate and
// agree with the Rust uniform layout.
#![cfg(feature = "gpu")]

use naga::valid::{Capabilities, ValidationFlags, Validator};
use naga::{Module, TypeInner};
use rays_core::{RaysUniforms, RAYS_WGSL};
use std::mem::{offset_of, size_of};

fn module() -> Module {
    naga::front::wgsl::parse_str(RAYS_WGSL).unwrap_or_else(|e| {
        panic!("{}", e.emit_to_string(RAYS_WGSL));
    })
}

#[test]
fn shader_validates() {
    let module = module();
    Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&module)
        .unwrap_or_else(|e| panic!("{e:?}"));
}

#[test]
fn shader_exposes_the_pipeline_entry_points() {
    let module = module();
    let names: Vec<&str> = module.entry_points.iter().map(|ep| ep.name.as_str()).collect();
    assert!(names.contains(&"vs_fullscreen"), "{names:?}");
    assert!(names.contains(&"fs_rays"), "{names:?}");
}

#[test]
fn uniform_struct_matches_rust_layout() {
    let module = module();
    let (members, span) = module
        .types
        .iter()
        .find_map(|(_, ty)| match (&ty.name, &ty.inner) {
            (Some(name), TypeInner::Struct { members, span }) if name == "RaysUniforms" => {
                Some((members.clone(), *span))
            }
            _ => None,
        })
        .expect("RaysUniforms struct in shader");

    assert_eq!(span as usize, size_of::<RaysUniforms>());
    let offset = |field: &str| {
        members
            .iter()
            .find(|m| m.name.as_deref() == Some(field))
            .map(|m| m.offset as usize)
            .unwrap_or_else(|| panic!("shader member {field} missing"))
    };
    assert_eq!(offset("resolution"), offset_of!(RaysUniforms, resolution));
    assert_eq!(offset("ray_pos"), offset_of!(RaysUniforms, ray_pos));
    assert_eq!(offset("ray_dir"), offset_of!(RaysUniforms, ray_dir));
    assert_eq!(offset("mouse_pos"), offset_of!(RaysUniforms, mouse_pos));
    assert_eq!(offset("color"), offset_of!(RaysUniforms, color));
    assert_eq!(offset("time"), offset_of!(RaysUniforms, time));
    assert_eq!(offset("speed"), offset_of!(RaysUniforms, speed));
    assert_eq!(offset("spread"), offset_of!(RaysUniforms, spread));
    assert_eq!(offset("ray_length"), offset_of!(RaysUniforms, ray_length));
    assert_eq!(offset("pulsating"), offset_of!(RaysUniforms, pulsating));
    assert_eq!(offset("fade_distance"), offset_of!(RaysUniforms, fade_distance));
    assert_eq!(offset("saturation"), offset_of!(RaysUniforms, saturation));
    assert_eq!(offset("mouse_influence"), offset_of!(RaysUniforms, mouse_influence));
    assert_eq!(offset("noise_amount"), offset_of!(RaysUniforms, noise_amount));
    assert_eq!(offset("distortion"), offset_of!(RaysUniforms, distortion));
    assert_eq!(offset("color"), 32);
}

#[test]
fn fragment_output_is_premultiplied() {
    assert!(RAYS_WGSL.contains("return vec4<f32>(rgb * alpha, alpha);"));
}
