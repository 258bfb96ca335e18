// Copyright (c) 2025 - Cowboy AI, Inc.
//! Sample schema and seed data
//!
//! Four teachers, three students, and two association classes linking
//! them. Pair lists are `(teacher, student)` indices, in registry order.

use crate::domain::{CimClass, CimDataType, CimInstance, CimPropertyDecl, CimType, ObjectPath, ObjectPathError};

use super::SampleClass;

pub const TEACHER_COUNT: u8 = 4;
pub const STUDENT_COUNT: u8 = 3;

pub const TEACHER_STUDENT_PAIRS: [(u8, u8); 8] =
    [(1, 1), (1, 2), (1, 3), (2, 1), (2, 2), (3, 2), (3, 3), (4, 1)];

pub const ADVISOR_STUDENT_PAIRS: [(u8, u8); 3] = [(1, 1), (1, 2), (2, 3)];

/// Instance of a member class with the `Name` / `Identifier` keys
pub fn member(class: SampleClass, name: impl Into<String>, identifier: u8) -> CimInstance {
    let name: String = name.into();
    CimInstance::new(class.class_name())
        .with_key_property("Name", name)
        .with_key_property("Identifier", identifier)
}

pub fn teacher(identifier: u8) -> CimInstance {
    member(SampleClass::Teacher, format!("Teacher{}", identifier), identifier)
}

pub fn student(identifier: u8) -> CimInstance {
    member(SampleClass::Student, format!("Student{}", identifier), identifier)
}

/// Association instance linking two member paths through `class`'s roles
pub fn link(class: SampleClass, left: ObjectPath, right: ObjectPath) -> Option<CimInstance> {
    let (left_role, right_role) = class.roles()?;
    Some(
        CimInstance::new(class.class_name())
            .with_key_property(left_role, left)
            .with_key_property(right_role, right),
    )
}

/// Every seed instance in `namespace`, grouped by class in insertion order
pub fn seed_instances(namespace: &str) -> Result<Vec<(SampleClass, CimInstance)>, ObjectPathError> {
    let mut seeded = Vec::new();

    let teachers: Vec<CimInstance> = (1..=TEACHER_COUNT).map(teacher).collect();
    let students: Vec<CimInstance> = (1..=STUDENT_COUNT).map(student).collect();

    let mut teacher_paths = Vec::with_capacity(teachers.len());
    for instance in &teachers {
        teacher_paths.push(instance.build_path(namespace)?);
    }
    let mut student_paths = Vec::with_capacity(students.len());
    for instance in &students {
        student_paths.push(instance.build_path(namespace)?);
    }

    seeded.extend(teachers.into_iter().map(|i| (SampleClass::Teacher, i)));
    seeded.extend(students.into_iter().map(|i| (SampleClass::Student, i)));

    for (class, pairs) in [
        (SampleClass::TeacherStudent, &TEACHER_STUDENT_PAIRS[..]),
        (SampleClass::AdvisorStudent, &ADVISOR_STUDENT_PAIRS[..]),
    ] {
        for &(t, s) in pairs {
            let left = teacher_paths[usize::from(t - 1)].clone();
            let right = student_paths[usize::from(s - 1)].clone();
            if let Some(association) = link(class, left, right) {
                seeded.push((class, association));
            }
        }
    }

    Ok(seeded)
}

/// Schema of every class the sample provider serves
pub fn sample_schema() -> Vec<CimClass> {
    SampleClass::ALL.iter().map(|class| class_definition(*class)).collect()
}

/// Schema of one sample class
pub fn class_definition(class: SampleClass) -> CimClass {
    match class.roles() {
        None => CimClass::new(class.class_name())
            .with_property(CimPropertyDecl::key("Name", CimDataType::scalar(CimType::String)))
            .with_property(CimPropertyDecl::key("Identifier", CimDataType::scalar(CimType::UInt8))),
        Some((left_role, right_role)) => CimClass::association(class.class_name())
            .with_property(CimPropertyDecl::key(
                left_role,
                CimDataType::reference(SampleClass::Teacher.class_name()),
            ))
            .with_property(CimPropertyDecl::key(
                right_role,
                CimDataType::reference(SampleClass::Student.class_name()),
            )),
    }
}
