// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Conversion and equality properties of the CIM value model.

mod object_path;
mod value_roundtrip;
