//! Literal parsing and comparison benchmarks using divan

use octofhir_himodel::{
    FhirDateTime, FhirDecimal, FhirTime, FhirValue, TypeModelConfig, TypeSpecId, ValueComparison,
};

fn main() {
    divan::main();
}

// === Parsing ===

mod parsing {
    use super::*;

    #[divan::bench]
    fn date_time_year(bencher: divan::Bencher) {
        bencher.bench_local(|| FhirDateTime::parse(divan::black_box("2024")));
    }

    #[divan::bench]
    fn date_time_nanosecond(bencher: divan::Bencher) {
        bencher.bench_local(|| {
            FhirDateTime::parse(divan::black_box("2024-03-15T10:20:30.123456789+02:00"))
        });
    }

    #[divan::bench]
    fn fluent_time(bencher: divan::Bencher) {
        bencher.bench_local(|| FhirTime::parse_fluent(divan::black_box("17:22:00.00")));
    }

    #[divan::bench]
    fn decimal(bencher: divan::Bencher) {
        bencher.bench_local(|| FhirDecimal::parse(divan::black_box("47.100")));
    }

    #[divan::bench]
    fn invalid_date_time(bencher: divan::Bencher) {
        bencher.bench_local(|| FhirDateTime::parse(divan::black_box("2024-03-15T10:20")));
    }
}

// === Rendering ===

mod rendering {
    use super::*;

    #[divan::bench]
    fn date_time(bencher: divan::Bencher) {
        let value = FhirDateTime::from_trusted("2024-03-15T10:20:30.123456789+02:00");
        bencher.bench_local(|| divan::black_box(&value).to_string());
    }
}

// === Comparison ===

mod comparison {
    use super::*;

    #[divan::bench]
    fn date_time_equivalent(bencher: divan::Bencher) {
        let left = FhirValue::from(FhirDateTime::from_trusted("2024-03-15T10:20:30Z"));
        let right = FhirValue::from(FhirDateTime::from_trusted("2024-03-15T12:20:30+02:00"));
        bencher.bench_local(|| divan::black_box(&left).equivalent(divan::black_box(&right)));
    }

    #[divan::bench]
    fn decimal_equivalent(bencher: divan::Bencher) {
        let left = FhirValue::from(FhirDecimal::from_trusted("47.10"));
        let right = FhirValue::from(FhirDecimal::from_trusted("47.1"));
        bencher.bench_local(|| divan::black_box(&left).equivalent(divan::black_box(&right)));
    }
}

// === Type registry ===

mod registry {
    use super::*;

    #[divan::bench]
    fn common_base(bencher: divan::Bencher) {
        let registry = TypeModelConfig::default()
            .with_type("Patient", Some("DomainResource"))
            .with_type("Person", Some("DomainResource"))
            .build_registry()
            .unwrap();
        let patient = registry.resolve("Patient").unwrap();
        let person = registry.resolve("Person").unwrap();
        bencher.bench_local(|| registry.common_base(divan::black_box(patient), person));
    }

    #[divan::bench]
    fn builtin_common_base(bencher: divan::Bencher) {
        let registry = octofhir_himodel::TypeRegistry::new();
        bencher.bench_local(|| {
            registry.common_base(divan::black_box(TypeSpecId::CODE), TypeSpecId::MARKDOWN)
        });
    }
}
