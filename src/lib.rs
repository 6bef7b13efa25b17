// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

#![doc(html_no_source)]

#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

pub mod geometry;
pub mod section_models;
pub mod loss_models;
pub mod induction;
pub mod wind;
pub mod fluid;
pub mod bem;
pub mod simulation;
pub mod error;
