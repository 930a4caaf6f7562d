// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Layer codec: stable integer codes for the IR kind vocabularies, and the
//! textual rendering of per-layer fields.
//!
//! The codes are part of the contract with the generated C code and must
//! never change between builds:
//!
//! | Layer kind | Code | | Activation | Code | | Padding | Code |
//! |---|---|---|---|---|---|---|---|
//! | dropout | 0 | | linear | 0 | | valid | 0 |
//! | dense | 1 | | sigmoid | 1 | | same | 1 |
//! | flatten | 2 | | relu | 2 | | | |
//! | maxpooling1d/2d/3d | 3/4/5 | | tanh | 3 | | | |
//! | avgpooling1d/2d/3d | 6/7/8 | | softmax | 4 | | | |
//! | conv1d/2d/3d | 9/10/11 | | | | | | |
//! | activation | 12 | | | | | | |
//!
//! Fields that do not apply to a layer are rendered as [`NOT_APPLICABLE`].

use crate::CodegenError;
use model_ir::{ActivationKind, LayerKind, ModelError, PaddingKind, PoolOp, SpatialRank};
use std::fmt::Display;

/// Rendered value of a per-layer field that does not apply to the layer.
pub const NOT_APPLICABLE: i64 = -1;

/// A closed vocabulary entry with a fixed integer code.
pub trait LayerCode {
    fn code(&self) -> i32;
}

impl LayerCode for LayerKind {
    fn code(&self) -> i32 {
        match self {
            LayerKind::Dropout => 0,
            LayerKind::Dense => 1,
            LayerKind::Flatten => 2,
            LayerKind::Pooling { rank, op } => {
                let base = match op {
                    PoolOp::Max => 3,
                    PoolOp::Average => 6,
                };
                base + rank_offset(*rank)
            }
            LayerKind::Convolution { rank } => 9 + rank_offset(*rank),
            LayerKind::Activation => 12,
        }
    }
}

fn rank_offset(rank: SpatialRank) -> i32 {
    match rank {
        SpatialRank::One => 0,
        SpatialRank::Two => 1,
        SpatialRank::Three => 2,
    }
}

impl LayerCode for ActivationKind {
    fn code(&self) -> i32 {
        match self {
            ActivationKind::Linear => 0,
            ActivationKind::Sigmoid => 1,
            ActivationKind::Relu => 2,
            ActivationKind::Tanh => 3,
            ActivationKind::Softmax => 4,
        }
    }
}

impl LayerCode for PaddingKind {
    fn code(&self) -> i32 {
        match self {
            PaddingKind::Valid => 0,
            PaddingKind::Same => 1,
        }
    }
}

/// Returns the code of a layer kind name such as `"maxpooling2d"`.
pub fn layer_code(name: &str) -> Result<i32, CodegenError> {
    LayerKind::parse(name).map(|k| k.code()).map_err(unknown_kind)
}

/// Returns the code of an activation name such as `"relu"`.
pub fn activation_code(name: &str) -> Result<i32, CodegenError> {
    ActivationKind::parse(name).map(|k| k.code()).map_err(unknown_kind)
}

/// Returns the code of a padding name (`"valid"` or `"same"`).
pub fn padding_code(name: &str) -> Result<i32, CodegenError> {
    PaddingKind::parse(name).map(|k| k.code()).map_err(unknown_kind)
}

fn unknown_kind(err: ModelError) -> CodegenError {
    match err {
        ModelError::UnknownKind { vocabulary, value } => {
            CodegenError::UnknownKind { vocabulary, value }
        }
        other => CodegenError::ModelError(other),
    }
}

/// Renders a sequence as a comma-separated list suitable for a C array
/// initializer. An empty sequence renders as an empty string.
pub fn render_list<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    let mut out = String::new();
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&item.to_string());
    }
    out
}

/// Renders parameter values as C floating literals.
///
/// `Debug` keeps a fractional part or exponent on every value (`1.0`, `1e20`),
/// so no value can turn into an integer constant that overflows in C. An
/// empty slice renders as a single `0`: the parameter arrays are declared
/// one element longer than their contents and C before C23 rejects `{ }`.
pub fn render_floats(values: &[f32]) -> String {
    if values.is_empty() {
        return "0".to_string();
    }
    render_list(values.iter().map(|v| format!("{v:?}")))
}

/// Renders optional per-layer values, using [`NOT_APPLICABLE`] for `None`.
pub fn render_optional<T: Display>(items: &[Option<T>]) -> String {
    render_list(items.iter().map(|v| match v {
        Some(v) => v.to_string(),
        None => NOT_APPLICABLE.to_string(),
    }))
}

/// Renders boolean flags as `0`/`1`.
pub fn render_flags(flags: &[bool]) -> String {
    render_list(flags.iter().map(|&f| u8::from(f)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_layer_codes_are_fixed() {
        let expected = [
            ("dropout", 0),
            ("dense", 1),
            ("flatten", 2),
            ("maxpooling1d", 3),
            ("maxpooling2d", 4),
            ("maxpooling3d", 5),
            ("avgpooling1d", 6),
            ("avgpooling2d", 7),
            ("avgpooling3d", 8),
            ("conv1d", 9),
            ("conv2d", 10),
            ("conv3d", 11),
            ("activation", 12),
        ];
        for (name, code) in expected {
            assert_eq!(layer_code(name).unwrap(), code, "code of {name}");
        }
    }

    #[test]
    fn test_layer_codes_are_distinct() {
        let codes: HashSet<i32> = LayerKind::ALL.iter().map(LayerCode::code).collect();
        assert_eq!(codes.len(), LayerKind::ALL.len());
        // ALL is listed in code order.
        for (i, kind) in LayerKind::ALL.iter().enumerate() {
            assert_eq!(kind.code(), i as i32);
        }
    }

    #[test]
    fn test_activation_codes() {
        assert_eq!(activation_code("linear").unwrap(), 0);
        assert_eq!(activation_code("sigmoid").unwrap(), 1);
        assert_eq!(activation_code("relu").unwrap(), 2);
        assert_eq!(activation_code("tanh").unwrap(), 3);
        assert_eq!(activation_code("softmax").unwrap(), 4);
        let codes: HashSet<i32> = ActivationKind::ALL.iter().map(LayerCode::code).collect();
        assert_eq!(codes.len(), ActivationKind::ALL.len());
    }

    #[test]
    fn test_padding_codes() {
        assert_eq!(padding_code("valid").unwrap(), 0);
        assert_eq!(padding_code("same").unwrap(), 1);
        assert_ne!(PaddingKind::Valid.code(), PaddingKind::Same.code());
    }

    #[test]
    fn test_sentinel_outside_code_space() {
        let all = LayerKind::ALL
            .iter()
            .map(LayerCode::code)
            .chain(ActivationKind::ALL.iter().map(LayerCode::code))
            .chain(PaddingKind::ALL.iter().map(LayerCode::code));
        for code in all {
            assert_ne!(i64::from(code), NOT_APPLICABLE);
        }
    }

    #[test]
    fn test_unknown_kind_fails() {
        match layer_code("transformer") {
            Err(CodegenError::UnknownKind { vocabulary, value }) => {
                assert_eq!(vocabulary, "layer");
                assert_eq!(value, "transformer");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            activation_code("elu"),
            Err(CodegenError::UnknownKind { vocabulary: "activation", .. })
        ));
        assert!(matches!(
            padding_code("full"),
            Err(CodegenError::UnknownKind { vocabulary: "padding", .. })
        ));
    }

    #[test]
    fn test_render_list() {
        assert_eq!(render_list([1, 2, 3]), "1, 2, 3");
        assert_eq!(render_list([0.5f32, -0.25]), "0.5, -0.25");
        assert_eq!(render_list(Vec::<i32>::new()), "");
    }

    #[test]
    fn test_render_floats_are_floating_literals() {
        assert_eq!(render_floats(&[0.5, -1.0, 0.0]), "0.5, -1.0, 0.0");
        assert_eq!(render_floats(&[1e20, 3.0e38, 1e-7]), "1e20, 3e38, 1e-7");
        for text in render_floats(&[2.0e19, 1.8e19, 65536.0]).split(", ") {
            assert!(text.contains('.') || text.contains('e'), "integer literal {text}");
        }
    }

    #[test]
    fn test_render_floats_empty_is_padding_zero() {
        assert_eq!(render_floats(&[]), "0");
    }

    #[test]
    fn test_render_optional_and_flags() {
        assert_eq!(render_optional(&[Some(2usize), None, Some(3)]), "2, -1, 3");
        assert_eq!(render_flags(&[true, false, true]), "1, 0, 1");
    }
}
