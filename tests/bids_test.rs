//! Integration tests for bid submission and the read-only query paths,
//! run against the in-memory store.
//!
//! Run with: `cargo test --test bids_test`

use uuid::Uuid;

use gigflow_backend::error::AppError;
use gigflow_backend::models::bids::{BidStatus, CreateBid};
use gigflow_backend::models::gigs::{self, CreateGig};
use gigflow_backend::services::{bids as bid_service, gigs as gig_service, hiring};
use gigflow_backend::store::{MarketStore, MemoryStore};

async fn seed_gig(store: &MemoryStore, owner: Uuid, title: &str) -> gigs::Model {
    gig_service::create_gig(
        store,
        owner,
        CreateGig {
            title: title.to_string(),
            description: "some work".to_string(),
            budget: 250.0,
        },
    )
    .await
    .expect("gig should be created")
}

fn bid_on(gig_id: Uuid) -> CreateBid {
    CreateBid {
        gig_id,
        message: "happy to help".to_string(),
        amount: 75.0,
    }
}

#[tokio::test]
async fn submit_bid_creates_a_pending_bid() {
    let store = MemoryStore::new();
    let gig = seed_gig(&store, Uuid::new_v4(), "Logo design").await;

    let freelancer = Uuid::new_v4();
    let bid = bid_service::submit_bid(&store, freelancer, bid_on(gig.id))
        .await
        .unwrap();
    assert_eq!(bid.status, BidStatus::Pending);
    assert_eq!(bid.gig_id, gig.id);
    assert_eq!(bid.freelancer_id, freelancer);

    // Nothing else mutated: the gig is untouched.
    let gig_after = store.gig_by_id(gig.id).await.unwrap().unwrap();
    assert_eq!(gig_after, gig);
}

#[tokio::test]
async fn owner_cannot_bid_on_own_gig() {
    let store = MemoryStore::new();
    let owner = Uuid::new_v4();
    let gig = seed_gig(&store, owner, "Logo design").await;

    let err = bid_service::submit_bid(&store, owner, bid_on(gig.id))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)), "got: {err}");
    // And never creates a record.
    assert!(store.bids_for_gig(gig.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn bidding_on_an_assigned_gig_is_rejected() {
    let store = MemoryStore::new();
    let owner = Uuid::new_v4();
    let gig = seed_gig(&store, owner, "Logo design").await;
    let winner = bid_service::submit_bid(&store, Uuid::new_v4(), bid_on(gig.id))
        .await
        .unwrap();
    hiring::hire(&store, winner.id, owner).await.unwrap();

    let err = bid_service::submit_bid(&store, Uuid::new_v4(), bid_on(gig.id))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)), "got: {err}");
    // Only the winning bid exists.
    assert_eq!(store.bids_for_gig(gig.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn bidding_on_unknown_gig_is_not_found() {
    let store = MemoryStore::new();
    let err = bid_service::submit_bid(&store, Uuid::new_v4(), bid_on(Uuid::new_v4()))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }), "got: {err}");
}

#[tokio::test]
async fn blank_message_and_bad_amounts_are_validation_errors() {
    let store = MemoryStore::new();
    let gig = seed_gig(&store, Uuid::new_v4(), "Logo design").await;
    let freelancer = Uuid::new_v4();

    let blank = CreateBid {
        message: "   ".to_string(),
        ..bid_on(gig.id)
    };
    let err = bid_service::submit_bid(&store, freelancer, blank)
        .await
        .unwrap_err();
    assert!(
        matches!(err, AppError::Validation { field: "message", .. }),
        "got: {err}"
    );

    for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        let bad = CreateBid {
            amount,
            ..bid_on(gig.id)
        };
        let err = bid_service::submit_bid(&store, freelancer, bad)
            .await
            .unwrap_err();
        assert!(
            matches!(err, AppError::Validation { field: "amount", .. }),
            "amount {amount} got: {err}"
        );
    }

    assert!(store.bids_for_gig(gig.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn only_the_owner_may_list_bids() {
    let store = MemoryStore::new();
    let owner = Uuid::new_v4();
    let gig = seed_gig(&store, owner, "Logo design").await;
    let freelancer = Uuid::new_v4();
    bid_service::submit_bid(&store, freelancer, bid_on(gig.id))
        .await
        .unwrap();

    let err = bid_service::list_bids_for_gig(&store, gig.id, freelancer)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)), "got: {err}");

    let bids = bid_service::list_bids_for_gig(&store, gig.id, owner)
        .await
        .unwrap();
    assert_eq!(bids.len(), 1);
}

#[tokio::test]
async fn repeated_reads_are_identical() {
    let store = MemoryStore::new();
    let owner = Uuid::new_v4();
    let gig = seed_gig(&store, owner, "Logo design").await;
    bid_service::submit_bid(&store, Uuid::new_v4(), bid_on(gig.id))
        .await
        .unwrap();
    bid_service::submit_bid(&store, Uuid::new_v4(), bid_on(gig.id))
        .await
        .unwrap();

    let first_gig = gig_service::get_gig(&store, gig.id).await.unwrap();
    let second_gig = gig_service::get_gig(&store, gig.id).await.unwrap();
    assert_eq!(first_gig, second_gig);

    let first_bids = bid_service::list_bids_for_gig(&store, gig.id, owner)
        .await
        .unwrap();
    let second_bids = bid_service::list_bids_for_gig(&store, gig.id, owner)
        .await
        .unwrap();
    assert_eq!(first_bids, second_bids);
}

#[tokio::test]
async fn open_gig_listing_filters_by_title_case_insensitively() {
    let store = MemoryStore::new();
    let owner = Uuid::new_v4();
    seed_gig(&store, owner, "Logo Design").await;
    seed_gig(&store, owner, "Data entry").await;
    let assigned = seed_gig(&store, owner, "Logo refresh").await;

    // Assign one of the matching gigs; it must drop out of the listing.
    let bid = bid_service::submit_bid(&store, Uuid::new_v4(), bid_on(assigned.id))
        .await
        .unwrap();
    hiring::hire(&store, bid.id, owner).await.unwrap();

    let all_open = gig_service::list_open_gigs(&store, None).await.unwrap();
    assert_eq!(all_open.len(), 2);

    let logos = gig_service::list_open_gigs(&store, Some("logo"))
        .await
        .unwrap();
    assert_eq!(logos.len(), 1);
    assert_eq!(logos[0].title, "Logo Design");

    // Blank filter behaves like no filter.
    let blank = gig_service::list_open_gigs(&store, Some("  "))
        .await
        .unwrap();
    assert_eq!(blank.len(), 2);
}

#[tokio::test]
async fn gig_validation_rejects_bad_input() {
    let store = MemoryStore::new();
    let owner = Uuid::new_v4();

    let err = gig_service::create_gig(
        &store,
        owner,
        CreateGig {
            title: "".to_string(),
            description: "desc".to_string(),
            budget: 100.0,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation { field: "title", .. }));

    let err = gig_service::create_gig(
        &store,
        owner,
        CreateGig {
            title: "ok".to_string(),
            description: "desc".to_string(),
            budget: -1.0,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation { field: "budget", .. }));

    assert!(gig_service::list_open_gigs(&store, None).await.unwrap().is_empty());
}
