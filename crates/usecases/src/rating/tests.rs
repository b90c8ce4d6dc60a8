// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use trackrater_repo_memory::InMemoryRatingRepo;

use super::*;

fn summary(average_rating: f64, total_ratings: u64) -> AggregateSummary {
    AggregateSummary {
        average_rating,
        total_ratings,
    }
}

#[test]
fn submit_and_query() -> anyhow::Result<()> {
    let repo = InMemoryRatingRepo::new();
    let abc = TrackId::new("abc");

    assert_eq!(summary(5.0, 1), submit(&repo, abc.clone(), Rating::new(5.0))?);
    assert_eq!(summary(4.0, 2), submit(&repo, abc.clone(), Rating::new(3.0))?);
    assert_eq!(summary(4.0, 2), query(&repo, &abc)?);
    assert_eq!(summary(0.0, 0), query(&repo, &TrackId::new("unknown"))?);
    Ok(())
}

#[test]
fn reject_out_of_range_ratings_without_mutation() -> anyhow::Result<()> {
    let repo = InMemoryRatingRepo::new();
    let abc = TrackId::new("abc");
    submit(&repo, abc.clone(), Rating::new(5.0))?;
    submit(&repo, abc.clone(), Rating::new(3.0))?;

    for invalid in [0.0, 6.0, 7.0, -3.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            submit(&repo, abc.clone(), Rating::new(invalid)),
            Err(Error::Input(_))
        ));
    }
    let aggregate = repo.load_rating_aggregate(&abc)?;
    assert_eq!(2, aggregate.total_ratings);
    assert_eq!(8.0, aggregate.rating_sum);
    Ok(())
}

#[test]
fn reject_empty_track_id() -> anyhow::Result<()> {
    let repo = InMemoryRatingRepo::new();
    assert!(matches!(
        submit(&repo, TrackId::new(""), Rating::new(3.0)),
        Err(Error::Input(_))
    ));
    assert!(matches!(
        query(&repo, &TrackId::new("")),
        Err(Error::Input(_))
    ));
    assert_eq!(0, repo.count_rated_tracks()?);
    Ok(())
}

#[test]
fn query_is_idempotent() -> anyhow::Result<()> {
    let repo = InMemoryRatingRepo::new();
    let abc = TrackId::new("abc");
    submit(&repo, abc.clone(), Rating::new(2.5))?;
    let first = query(&repo, &abc)?;
    let second = query(&repo, &abc)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn average_is_independent_of_submission_order() -> anyhow::Result<()> {
    let ratings = [1.0, 4.0, 5.0, 2.0, 3.0];
    let forward_repo = InMemoryRatingRepo::new();
    let backward_repo = InMemoryRatingRepo::new();
    let abc = TrackId::new("abc");
    for rating in ratings {
        submit(&forward_repo, abc.clone(), Rating::new(rating))?;
    }
    for rating in ratings.iter().rev() {
        submit(&backward_repo, abc.clone(), Rating::new(*rating))?;
    }
    assert_eq!(summary(3.0, 5), query(&forward_repo, &abc)?);
    assert_eq!(query(&forward_repo, &abc)?, query(&backward_repo, &abc)?);
    Ok(())
}
