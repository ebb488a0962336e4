use peoplegrid_lib::generate::make_data_with;
use peoplegrid_lib::generate::parse_lengths;
use peoplegrid_lib::make_data;
use peoplegrid_lib::model::Status;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_single_level() {
    let data = make_data(&[5]);
    assert_eq!(data.len(), 5);
    assert!(data.iter().all(|r| r.is_leaf()));
    assert!(data.iter().all(|r| r.depth() == 1));
}

#[test]
fn test_two_levels() {
    let data = make_data(&[3, 4]);
    assert_eq!(data.len(), 3);
    for record in &data {
        let children = record.sub_rows.as_ref().unwrap();
        assert_eq!(children.len(), 4);
        assert!(children.iter().all(|c| c.is_leaf()));
    }
}

#[test]
fn test_no_lengths() {
    assert!(make_data(&[]).is_empty());
}

#[test]
fn test_zero_length_ends_tree() {
    let data = make_data(&[2, 0]);
    assert_eq!(data.len(), 2);
    assert!(data.iter().all(|r| r.is_leaf()));
}

#[test]
fn test_field_ranges() {
    let mut rng = StdRng::seed_from_u64(7);
    let data = make_data_with(&mut rng, &[500]);
    for record in &data {
        let p = &record.person;
        assert!(p.age < 30);
        assert!(p.visits < 100);
        assert!(p.progress < 100);
        assert!(!p.first_name.is_empty());
        assert!(!p.last_name.is_empty());
    }
}

#[test]
fn test_status_distribution() {
    let mut rng = StdRng::seed_from_u64(42);
    let data = make_data_with(&mut rng, &[100_000]);
    let share = |status: Status| {
        data.iter().filter(|r| r.person.status == status).count() as f64 / data.len() as f64
    };
    assert!((share(Status::Relationship) - 0.34).abs() < 0.01);
    assert!((share(Status::Complicated) - 0.33).abs() < 0.01);
    assert!((share(Status::Single) - 0.33).abs() < 0.01);
}

#[test]
fn test_seeded_generation_is_repeatable() {
    let a = make_data_with(&mut StdRng::seed_from_u64(1), &[10, 2]);
    let b = make_data_with(&mut StdRng::seed_from_u64(1), &[10, 2]);
    assert_eq!(a, b);
}

#[test]
fn test_parse_lengths_feeds_make_data() {
    let lens = parse_lengths("4, 2").unwrap();
    let data = make_data(&lens);
    assert_eq!(data.iter().map(|r| r.count()).sum::<usize>(), 4 + 4 * 2);
    assert!(parse_lengths("3,-1").is_err());
}
