//! End-to-end mapping behaviour over an in-memory store.

use varfhir_core::{MapError, ReportContext, ReportOptions, SampleRegistry, make_id};
use varfhir_ingest::{MemoryStore, Provenance, VariantRow};
use varfhir_model::{ComponentValue, Observation, Resource};
use varfhir_standards::LookupError;

/// Provenance whose derived seed is exactly `seedval`.
fn seedval_provenance() -> Provenance {
    Provenance {
        input_paths: "xseedval".to_string(),
        annotators: "[y]".to_string(),
        mapper: String::new(),
    }
}

fn example_row() -> VariantRow {
    VariantRow {
        samples: Some("S1".to_string()),
        so: Some("missense_variant".to_string()),
        ..VariantRow::snv("chr1", 100, "A", "T")
    }
}

fn run(store: &MemoryStore, options: ReportOptions) -> SampleRegistry {
    let mut context = ReportContext::setup(store, options).unwrap();
    context.map_rows().unwrap();
    context.into_registry()
}

fn observations(registry: &SampleRegistry, sample: &str) -> Vec<(String, Observation)> {
    registry
        .get(sample)
        .unwrap()
        .entries()
        .iter()
        .filter_map(|entry| match &entry.resource {
            Resource::Observation(observation) => {
                Some((entry.full_url.clone(), (**observation).clone()))
            }
            _ => None,
        })
        .collect()
}

#[test]
fn seed_fixture_derives_seedval() {
    let store = MemoryStore::new(seedval_provenance()).with_samples(["S1"]);
    let context = ReportContext::setup(&store, ReportOptions::default()).unwrap();
    assert_eq!(context.run_context().seed(), "seedval");
}

#[test]
fn worked_example_identifiers_and_codes() {
    let store = MemoryStore::new(seedval_provenance())
        .with_samples(["S1"])
        .with_row(example_row());
    let registry = run(&store, ReportOptions::default());

    let observations = observations(&registry, "S1");
    assert_eq!(observations.len(), 2);

    let (variant_url, _) = &observations[0];
    assert_eq!(variant_url, &make_id("seedval1100ATseedval").urn());

    let (consequence_url, consequence) = &observations[1];
    assert_eq!(
        consequence_url,
        &make_id("seedval1100ATmolecular consequence 1seedval").urn()
    );
    let so = consequence
        .components_with_code("feature-consequence")
        .next()
        .unwrap();
    match &so.value {
        ComponentValue::CodeableConcept(concept) => {
            assert_eq!(concept.coding[0].code.as_deref(), Some("SO:0001583"));
            assert_eq!(concept.coding[0].display.as_deref(), Some("missense_variant"));
        }
        other => panic!("unexpected value {other:?}"),
    }
    assert_eq!(
        consequence.derived_from[0].reference.as_deref(),
        Some(variant_url.as_str())
    );
}

#[test]
fn reruns_are_identical() {
    let store = MemoryStore::new(seedval_provenance())
        .with_samples(["S1", "S2"])
        .with_row(VariantRow {
            samples: Some("S1,S2".to_string()),
            all_mappings: Some("T1:P1:G:missense_variant:p.A1T:c.1A>T".to_string()),
            ..example_row()
        });
    let options = ReportOptions::default().with_all_transcripts(true);
    let first = run(&store, options.clone());
    let second = run(&store, options);

    for sample in ["S1", "S2"] {
        assert_eq!(
            first.get(sample).unwrap().entries(),
            second.get(sample).unwrap().entries()
        );
        assert_eq!(
            first.get(sample).unwrap().document_id(),
            second.get(sample).unwrap().document_id()
        );
    }
}

#[test]
fn samples_get_independent_observations() {
    let store = MemoryStore::new(seedval_provenance())
        .with_samples(["S1", "S2"])
        .with_row(VariantRow {
            samples: Some("S1,S2".to_string()),
            ..example_row()
        });
    let registry = run(&store, ReportOptions::default());

    let a = observations(&registry, "S1");
    let b = observations(&registry, "S2");
    assert_eq!(a.len(), 2);
    assert_eq!(b.len(), 2);

    let (_, variant_a) = &a[0];
    let (_, variant_b) = &b[0];
    assert_eq!(variant_a.component, variant_b.component);
    assert_ne!(variant_a.subject, variant_b.subject);
    assert_eq!(
        variant_a.subject.reference,
        Some(registry.get("S1").unwrap().subject_id().urn())
    );
}

#[test]
fn amino_acid_components_are_all_or_nothing() {
    let with_change = VariantRow {
        achange: Some("p.Val600Glu".to_string()),
        transcript: Some("ENST00000288602".to_string()),
        refseq: Some("NM_004333".to_string()),
        ..example_row()
    };
    let without_change = VariantRow {
        pos: 200,
        pos_end: 200,
        achange: Some(" ".to_string()),
        ..with_change.clone()
    };
    let store = MemoryStore::new(seedval_provenance())
        .with_samples(["S1"])
        .with_row(with_change)
        .with_row(without_change);
    let registry = run(&store, ReportOptions::default());

    let observations = observations(&registry, "S1");
    let counts: Vec<usize> = [&observations[1].1, &observations[3].1]
        .iter()
        .map(|observation| observation.components_with_code("48005-3").count())
        .collect();
    assert_eq!(counts, vec![2, 0]);
}

#[test]
fn expansion_skips_unknown_and_keeps_ids_unique() {
    let store = MemoryStore::new(seedval_provenance())
        .with_samples(["S1"])
        .with_row(VariantRow {
            all_mappings: Some(
                "T1:P1:G:missense_variant::;T1:P1:G:missense_variant::;\
                 T2:P2:G:unknown::;T3:P3:G:unknown,unknown::;T4:P4"
                    .to_string(),
            ),
            ..example_row()
        });

    let primary = run(&store, ReportOptions::default());
    assert_eq!(observations(&primary, "S1").len(), 2);

    let all = run(&store, ReportOptions::default().with_all_transcripts(true));
    let observations = observations(&all, "S1");
    assert_eq!(observations.len(), 4);

    let mut urls: Vec<&str> = observations.iter().map(|(url, _)| url.as_str()).collect();
    urls.sort_unstable();
    urls.dedup();
    assert_eq!(urls.len(), 4);

    for (_, consequence) in &observations[1..] {
        assert_eq!(
            consequence.derived_from[0].reference.as_deref(),
            Some(observations[0].0.as_str())
        );
    }
}

#[test]
fn unknown_consequence_term_aborts_the_run() {
    let store = MemoryStore::new(seedval_provenance())
        .with_samples(["S1"])
        .with_row(VariantRow {
            so: Some("made_up_variant".to_string()),
            ..example_row()
        });
    let mut context = ReportContext::setup(&store, ReportOptions::default()).unwrap();
    let err = context.map_rows().unwrap_err();
    assert!(matches!(
        err,
        MapError::Lookup {
            source: LookupError::UnknownConsequence(ref term),
            ..
        } if term == "made_up_variant"
    ));
}

#[test]
fn samples_without_rows_keep_only_their_subject() {
    let store = MemoryStore::new(seedval_provenance()).with_samples(["X", "Y", "Z"]);
    let registry = run(&store, ReportOptions::default());
    assert_eq!(registry.len(), 3);
    for sample in registry.iter() {
        assert_eq!(sample.entries().len(), 1);
        assert_eq!(sample.entries()[0].resource.resource_type(), "Patient");
    }
}
