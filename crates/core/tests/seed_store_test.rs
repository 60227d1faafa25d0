#[cfg(test)]
mod tests {
    use geostack::config::Config;
    use geostack::{CRANE, GeostackError, Repository, TRAIL, open_store};
    use std::fs;
    use tempfile::tempdir;

    const CRANE_SEED: &str = include_str!("../../../demos/seed/crane.json");
    const TRAIL_SEED: &str = include_str!("../../../demos/seed/trail.json");
    const AGNETHA: &str = "5e2aec9e0bd1ad3f3ce7a1a4";
    const PIETERPAD: &str = "5e3bd0000bd1ad3f3ce70001";

    async fn repositories() -> (Repository, Repository) {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = tempdir().unwrap();
        let crane_path = dir.path().join("crane.json");
        let trail_path = dir.path().join("trail.json");
        fs::write(&crane_path, CRANE_SEED).unwrap();
        fs::write(&trail_path, TRAIL_SEED).unwrap();

        let toml = format!(
            r#"
            [crane]
            backend = "memory"
            seed = "{}"

            [trail]
            backend = "memory"
            seed = "{}"

            [limits]
            max_amount = 1000
            "#,
            crane_path.display(),
            trail_path.display()
        );
        let config = Config::from_toml(&toml).unwrap();
        config.validate().unwrap();

        let crane = open_store(&config.crane, &CRANE).await.unwrap();
        let trail = open_store(&config.trail, &TRAIL).await.unwrap();
        (
            Repository::new(CRANE, config.limits, crane),
            Repository::new(TRAIL, config.limits, trail),
        )
    }

    #[tokio::test]
    async fn test_seeded_crane_queries() {
        let (cranes, _) = repositories().await;

        assert_eq!(cranes.parents().await.unwrap().len(), 2);
        assert_eq!(cranes.count_children().await.unwrap(), 5);

        let agnetha = cranes.children(AGNETHA).await.unwrap();
        assert_eq!(agnetha.len(), 4);
        assert!(
            agnetha
                .iter()
                .all(|t| t.get_object_id("tracker").unwrap().to_hex() == AGNETHA)
        );

        // 64-bit event ids survive the extended JSON seed
        assert_eq!(agnetha[0].get_i64("event_id").unwrap(), 3_071_520_001);

        let window = cranes
            .children_between(AGNETHA, "2017-06-05", "2017-06-25")
            .await
            .unwrap();
        let events: Vec<i64> = window.iter().map(|t| t.get_i64("event_id").unwrap()).collect();
        assert_eq!(events, vec![3_071_520_002, 3_071_520_004]);

        let ring = "23.5,54.9,24.5,54.9,24.5,55.4,23.5,55.4,23.5,54.9";
        assert_eq!(cranes.children_within(AGNETHA, ring).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_seeded_trail_queries() {
        let (_, trails) = repositories().await;

        let found = trails.parent(PIETERPAD).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].get_str("abr").unwrap(), "PP1");
        assert_eq!(trails.children_by_amount(PIETERPAD, "2").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_configured_amount_ceiling() {
        let (cranes, _) = repositories().await;
        assert!(cranes.children_by_amount(AGNETHA, "1000").await.is_ok());
        assert!(matches!(
            cranes.children_by_amount(AGNETHA, "1001").await,
            Err(GeostackError::AmountTooLarge {
                requested: 1001,
                max: 1000
            })
        ));
    }
}
