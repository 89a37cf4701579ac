//! Type registry and common-base resolution

use octofhir_himodel_types::*;
use pretty_assertions::assert_eq;
use std::io::Write;

fn patient_person_registry() -> TypeRegistry {
    TypeModelConfig::default()
        .with_type("Patient", Some("DomainResource"))
        .with_type("Person", Some("DomainResource"))
        .with_type("UnrelatedType", None)
        .build_registry()
        .unwrap()
}

#[test]
fn test_common_base_of_siblings() {
    let registry = patient_person_registry();
    let patient = registry.resolve("Patient").unwrap();
    let person = registry.resolve("FHIR.Person").unwrap();
    let unrelated = registry.resolve("UnrelatedType").unwrap();

    assert_eq!(registry.common_base(patient, person), Some(TypeSpecId::DOMAIN_RESOURCE));
    assert_eq!(registry.common_base(patient, patient), Some(patient));
    assert_eq!(registry.common_base(patient, unrelated), None);
}

#[test]
fn test_common_base_of_builtins() {
    let registry = TypeRegistry::new();
    assert_eq!(
        registry.common_base(TypeSpecId::CODE, TypeSpecId::MARKDOWN),
        Some(TypeSpecId::STRING)
    );
    assert_eq!(
        registry.common_base(TypeSpecId::DATE, TypeSpecId::DECIMAL),
        Some(TypeSpecId::ELEMENT)
    );
    assert_eq!(registry.common_base(TypeSpecId::CODE, TypeSpecId::RESOURCE), None);
    assert_eq!(registry.common_base(TypeSpecId::COLLECTION, TypeSpecId::ELEMENT), None);
}

#[test]
fn test_ancestor_chain() {
    let registry = patient_person_registry();
    let patient = registry.resolve("Patient").unwrap();
    let names: Vec<String> = registry
        .ancestors(patient)
        .filter_map(|id| registry.name_of(id).map(ToString::to_string))
        .collect();
    assert_eq!(names, vec!["FHIR.Patient", "FHIR.DomainResource", "FHIR.Resource"]);
    assert!(registry.is_derived_from(patient, TypeSpecId::RESOURCE));
    assert!(!registry.is_derived_from(TypeSpecId::RESOURCE, patient));
}

#[test]
fn test_value_type_specs_match_registry_names() {
    let registry = TypeRegistry::new();
    let cases: Vec<(FhirValue, &str)> = vec![
        (FhirString::nil(StringKind::Code).into(), "FHIR.code"),
        (FhirUri::ucum().into(), "FHIR.uri"),
        (FhirDecimal::from(1).into(), "FHIR.decimal"),
        (FhirTime::nil().into(), "FHIR.time"),
        (Quantity::empty().into(), "FHIR.Quantity"),
        (Collection::of(TypeSpecId::STRING).into(), "Collection"),
    ];
    for (value, expected) in cases {
        let name = registry.name_of(value.type_spec()).unwrap();
        assert_eq!(name.to_string(), expected);
    }
}

#[test]
fn test_builder_rejects_duplicates() {
    let mut builder = TypeRegistry::builder();
    builder
        .register(FqTypeName::fhir("Patient"), Some(TypeSpecId::DOMAIN_RESOURCE))
        .unwrap();
    let err = builder
        .register(FqTypeName::fhir("Patient"), Some(TypeSpecId::RESOURCE))
        .unwrap_err();
    assert_eq!(err.code().to_string(), "HIM0101");
    assert!(err.code().is_type_model_error());
}

#[test]
fn test_config_file_round_trip() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{"namespace": "Example", "types": [
            {{"name": "Observation", "base": "FHIR.DomainResource"}},
            {{"name": "VitalSigns", "base": "Observation"}}
        ]}}"#
    )
    .unwrap();

    let config = TypeModelConfig::from_file(file.path()).unwrap();
    let registry = config.build_registry().unwrap();
    let vitals = registry.resolve("Example.VitalSigns").unwrap();
    let observation = registry.lookup(&config.qualify("Observation")).unwrap();
    assert_eq!(registry.base_of(vitals), Some(observation));
    assert_eq!(registry.base_of(observation), Some(TypeSpecId::DOMAIN_RESOURCE));
}

#[test]
fn test_config_file_errors() {
    let missing = TypeModelConfig::from_file("/nonexistent/types.json").unwrap_err();
    assert!(missing.code().is_system_error());

    let wrong_extension = TypeModelConfig::from_file("types.yaml").unwrap_err();
    assert!(wrong_extension.to_string().contains(".yaml"));

    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, "{{\"types\": [").unwrap();
    let malformed = TypeModelConfig::from_file(file.path()).unwrap_err();
    assert_eq!(malformed.code().to_string(), "HIM0406");
    assert!(malformed.context().is_some());
}
