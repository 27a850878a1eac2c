use kissbot_wishlist_compare::{
    filter_games, CompareEngine, CompareOptions, ComparisonJob, ExclusionEntry, ExclusionList, Game,
    GameCollection,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("kissbot_wishlist_compare=debug"))
        .with_test_writer()
        .try_init();
}

fn steam(games: Vec<Game>) -> GameCollection {
    GameCollection::new("steam", "alice", games)
}

fn gog(games: Vec<Game>) -> GameCollection {
    GameCollection::new("gog", "bob", games)
}

fn names(games: &[Game]) -> Vec<&str> {
    games.iter().map(|g| g.name.as_str()).collect()
}

#[test]
fn test_identical_wishlists() {
    init_tracing();
    let engine = CompareEngine::default();
    let result = engine.run(
        &steam(vec![Game::new(Some(730), "Counter-Strike")]),
        &gog(vec![Game::new(Some(730), "Counter-Strike")]),
        &[],
    );

    assert_eq!(names(&result.both), vec!["Counter-Strike"]);
    assert!(result.only_in_first.is_empty());
    assert!(result.only_in_second.is_empty());
    assert_eq!(result.match_percentage(), 100.0);
    assert!(result.are_identical());
    assert_eq!(result.first_label, "steam");
    assert_eq!(result.second_label, "gog");
}

#[test]
fn test_punctuation_only_difference() {
    init_tracing();
    let result = CompareEngine::default().run(
        &steam(vec![Game::new(Some(730), "Counter-Strike")]),
        &gog(vec![Game::new(Some(730), "Counter Strike")]),
        &[],
    );
    assert_eq!(result.both.len(), 1);
    assert!(result.are_identical());
}

#[test]
fn test_no_overlap() {
    let result = CompareEngine::default().run(
        &steam(vec![Game::new(Some(730), "Counter-Strike")]),
        &gog(vec![Game::new(Some(570), "Dota 2")]),
        &[],
    );
    assert!(result.both.is_empty());
    assert_eq!(names(&result.only_in_first), vec!["Counter-Strike"]);
    assert_eq!(names(&result.only_in_second), vec!["Dota 2"]);
    assert_eq!(result.match_percentage(), 0.0);
    assert!(!result.have_overlap());
}

#[test]
fn test_exclusion_removes_game_from_both_sides() {
    init_tracing();
    let first = steam(vec![Game::new(Some(730), "Counter-Strike")]);
    let second = gog(vec![Game::new(Some(730), "Counter-Strike")]);
    let exclusions = vec![ExclusionEntry::new("Counter-Strike", Some(730), "not interested")];

    assert!(filter_games(&first, &exclusions).is_empty());

    let result = CompareEngine::default().run(&first, &second, &exclusions);
    assert!(result.both.is_empty());
    assert!(result.only_in_first.is_empty());
    assert!(result.only_in_second.is_empty());
    assert_eq!(result.match_percentage(), 0.0);
}

#[test]
fn test_shared_id_does_not_double_match() {
    let first = steam(vec![
        Game::new(Some(730), "Counter-Strike"),
        Game::new(Some(730), "CS:GO"),
    ]);
    let second = gog(vec![Game::new(Some(730), "Counter Strike")]);

    let result = CompareEngine::default().run(&first, &second, &[]);
    assert_eq!(names(&result.both), vec!["Counter-Strike"]);
    assert_eq!(names(&result.only_in_first), vec!["CS:GO"]);
    assert!(result.only_in_second.is_empty());
}

#[test]
fn test_threshold_sensitivity() {
    let first = steam(vec![Game::new(Some(730), "Counter-Strike")]);
    let second = gog(vec![Game::new(Some(730), "Counter Strike")]);

    let loose = CompareEngine::new(CompareOptions::default().with_threshold(0.2)).unwrap();
    assert_eq!(loose.run(&first, &second, &[]).match_count(), 1);

    let strict = CompareEngine::new(CompareOptions::default().with_threshold(0.05)).unwrap();
    let result = strict.run(&first, &second, &[]);
    assert_eq!(result.match_count(), 0);
    assert_eq!(result.total_unique_games(), 2);
}

#[test]
fn test_empty_wishlists() {
    let result = CompareEngine::default().run(&steam(vec![]), &gog(vec![]), &[]);
    assert_eq!(result.total_unique_games(), 0);
    assert_eq!(result.match_percentage(), 0.0);
    assert!(result.are_identical());
}

#[test]
fn test_editions_and_numerals_reconcile() {
    let first = steam(vec![
        Game::new(Some(489830), "The Elder Scrolls V: Skyrim Special Edition"),
        Game::new(Some(382900), "Final Fantasy VI"),
        Game::new(Some(0), "Ratchet and Clank"),
        Game::new(Some(22370), "Fallout 3: Game of the Year Edition"),
    ]);
    let second = gog(vec![
        Game::named("Fallout 3"),
        Game::named("Ratchet & Clank"),
        Game::named("FINAL FANTASY 6"),
        Game::named("The Elder Scrolls V Skyrim Special"),
        Game::named("Celeste"),
    ]);

    let result = CompareEngine::default().run(&first, &second, &[]);
    assert_eq!(result.match_count(), 4);
    assert_eq!(names(&result.only_in_second), vec!["Celeste"]);
    assert_eq!(result.match_percentage(), 80.0);
}

#[test]
fn test_json_boundaries() -> anyhow::Result<()> {
    let first = GameCollection::from_json(
        "steam",
        "alice",
        r#"[{"name": "Hades", "id": 1145360}, "Celeste", {"name": "Inside"}]"#,
    )?;
    let second = GameCollection::from_json("gog", "alice", r#"["hades", "Limbo"]"#)?;
    let exclusions = ExclusionList::from_json(r#"[{"name": "Inside", "reason": "finished"}]"#)?;

    let result = CompareEngine::new(CompareOptions::from_json(r#"{"fuzzyMatchThreshold": 0.2}"#)?)?
        .run(&first, &second, exclusions.entries());

    let report = result.to_report();
    assert_eq!(report.both, vec!["Hades"]);
    assert_eq!(report.only_in_first, vec!["Celeste"]);
    assert_eq!(report.only_in_second, vec!["Limbo"]);
    assert_eq!(report.stats.total_unique_games, 3);

    let json = serde_json::to_value(&report)?;
    assert_eq!(json["firstLabel"], "steam");
    assert_eq!(json["stats"]["matchCount"], 1);
    Ok(())
}

#[test]
fn test_run_batch_matches_sequential_runs() {
    let engine = CompareEngine::default();
    let jobs: Vec<ComparisonJob> = (0..8)
        .map(|i| {
            ComparisonJob::new(
                steam(vec![Game::named(format!("Game {}", i)), Game::named("Shared Title")]),
                gog(vec![Game::named("shared title"), Game::named(format!("Other {}", i))]),
            )
        })
        .collect();
    let exclusions = vec![ExclusionEntry::new("Game 3", None, "")];

    let batch = engine.run_batch(&jobs, &exclusions);
    assert_eq!(batch.len(), jobs.len());
    for (job, result) in jobs.iter().zip(&batch) {
        let single = engine.run(&job.first, &job.second, &exclusions);
        assert_eq!(result.both, single.both);
        assert_eq!(result.only_in_first, single.only_in_first);
        assert_eq!(result.only_in_second, single.only_in_second);
    }
    assert!(batch[3].only_in_first.is_empty());
}
