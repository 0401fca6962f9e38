// tests/admin_tests.rs
mod common;

use common::*;
use tayarpro::errors::AppError;
use tayarpro::models::{CarSpecInput, CarType, Product};
use tayarpro::services::catalog::{self, ServiceInput, TyreInput};
use tayarpro::services::vehicles::{self, RegisterCarInput};
use tayarpro::services::{accounts, notifications};

fn tyre_input(id: &str) -> TyreInput {
  TyreInput {
    id: id.to_string(),
    brand_id: "BRID".to_string(),
    description: "Bridgestone Turanza".to_string(),
    car_type: "Passenger".to_string(),
    image_link: "/images/brid.png".to_string(),
    unit_price: 38_000,
    tyre_size: "215/60R16".to_string(),
    speed_index: "H".to_string(),
    load_index: 95,
    stock: 4,
    status: "Active".to_string(),
  }
}

fn service_input(id: &str) -> ServiceInput {
  ServiceInput {
    id: id.to_string(),
    type_id: "BAL".to_string(),
    description: "Wheel balancing".to_string(),
    car_type: "All".to_string(),
    unit_price: 4_000,
    status: "Active".to_string(),
  }
}

#[tokio::test]
async fn test_admin_adds_and_updates_tyre() {
  let shop = shop().await;

  let tyre = catalog::add_tyre(&shop.state, &shop.admin, tyre_input("BRID-T005")).await.unwrap();
  assert_eq!(tyre.created_by, Some(shop.admin.account_id));

  let mut update = tyre_input("BRID-T005");
  update.stock = 9;
  update.unit_price = 40_000;
  let updated = catalog::update_tyre(&shop.state, &shop.admin, update).await.unwrap();
  assert_eq!(updated.created_by, Some(shop.admin.account_id));

  match catalog::get_product(&shop.state, "BRID-T005").await.unwrap() {
    Product::Tyre(t) => {
      assert_eq!(t.stock, 9);
      assert_eq!(t.unit_price, 40_000);
    }
    other => panic!("expected tyre, got {:?}", other),
  }
}

#[tokio::test]
async fn test_catalog_rejects_duplicates_and_bad_fields() {
  let shop = shop().await;
  catalog::add_service(&shop.state, &shop.admin, service_input("SRV-BAL")).await.unwrap();

  let err = catalog::add_service(&shop.state, &shop.admin, service_input("SRV-BAL")).await.unwrap_err();
  assert!(matches!(err, AppError::Conflict(m) if m == "ID already exists"));

  let mut bad = tyre_input("BRID-X");
  bad.load_index = 0;
  assert!(matches!(
    catalog::add_tyre(&shop.state, &shop.admin, bad).await,
    Err(AppError::Validation(_))
  ));

  let mut bad = service_input("SRV-CHEAP");
  bad.unit_price = 0;
  assert!(matches!(
    catalog::add_service(&shop.state, &shop.admin, bad).await,
    Err(AppError::Validation(_))
  ));

  assert!(matches!(
    catalog::update_service(&shop.state, &shop.admin, service_input("SRV-MISSING")).await,
    Err(AppError::NotFound(_))
  ));
}

#[tokio::test]
async fn test_catalog_writes_require_admin() {
  let shop = shop().await;
  let err = catalog::add_tyre(&shop.state, &shop.customer, tyre_input("BRID-T005")).await.unwrap_err();
  assert!(matches!(err, AppError::Unauthorized(m) if m == "You are not admin"));
  assert_eq!(catalog::list_products(&shop.state).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_set_admin_and_list_accounts() {
  let shop = shop().await;

  accounts::set_admin(&shop.state, &shop.admin, shop.customer.account_id, true)
    .await
    .unwrap();
  let listed = accounts::list_accounts(&shop.state, &shop.admin).await.unwrap();
  assert_eq!(listed.len(), 3);
  assert!(listed[0].is_admin && listed[1].is_admin);
  assert!(!listed[2].is_admin);

  let claims = accounts::claims_for(&shop.state, shop.customer.account_id).await.unwrap();
  assert!(claims.is_admin);

  let err = accounts::set_admin(&shop.state, &shop.admin, uuid::Uuid::new_v4(), true)
    .await
    .unwrap_err();
  assert!(matches!(err, AppError::NotFound(_)));
  assert!(matches!(
    accounts::claims_for(&shop.state, uuid::Uuid::new_v4()).await,
    Err(AppError::Unauthenticated(_))
  ));
}

#[tokio::test]
async fn test_notification_feed_is_admin_only() {
  let shop = shop().await;
  assert!(matches!(
    notifications::recent(&shop.state, &shop.customer).await,
    Err(AppError::Unauthorized(_))
  ));
  assert!(notifications::recent(&shop.state, &shop.admin).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_car_spec_crud_and_registration() {
  let shop = shop().await;
  let input = |year: i32| CarSpecInput {
    brand: "Honda".to_string(),
    model: "City".to_string(),
    year,
    tyre_size: "185/55R16".to_string(),
    car_type: CarType::Passenger,
  };

  assert!(matches!(
    vehicles::create_spec(&shop.state, input(1800)).await,
    Err(AppError::Validation(_))
  ));
  let spec = vehicles::create_spec(&shop.state, input(2020)).await.unwrap();
  let updated = vehicles::update_spec(&shop.state, spec.id, input(2023)).await.unwrap();
  assert_eq!(updated.year, 2023);
  assert_eq!(vehicles::get_spec(&shop.state, spec.id).await.unwrap().year, 2023);

  let car = vehicles::register_car(
    &shop.state,
    &shop.other,
    RegisterCarInput {
      car_spec_id: spec.id,
      plate_number: " VAB 55 ".to_string(),
    },
  )
  .await
  .unwrap();
  assert_eq!(car.plate_number, "VAB 55");
  assert_eq!(vehicles::list_cars(&shop.state, &shop.other).await.unwrap().len(), 2);

  let err = vehicles::register_car(
    &shop.state,
    &shop.other,
    RegisterCarInput {
      car_spec_id: 9_999,
      plate_number: "X 1".to_string(),
    },
  )
  .await
  .unwrap_err();
  assert!(matches!(err, AppError::NotFound(_)));

  assert!(matches!(
    vehicles::delete_spec(&shop.state, spec.id).await,
    Err(AppError::Conflict(_))
  ));

  let unused = vehicles::create_spec(&shop.state, input(2019)).await.unwrap();
  vehicles::delete_spec(&shop.state, unused.id).await.unwrap();
  assert!(matches!(
    vehicles::get_spec(&shop.state, unused.id).await,
    Err(AppError::NotFound(_))
  ));
}
