// src/store/seed.rs

//! Demo data for a fresh store.

use chrono::Utc;
use tracing::{info, instrument};

use super::ShopStore;
use crate::errors::Result;
use crate::models::{Account, CarSpecInput, CarType, Service, Tyre};

pub const DEMO_ADMIN_EMAIL: &str = "admin@tayarpro.my";
pub const DEMO_CUSTOMER_EMAIL: &str = "customer@tayarpro.my";

/// Seeds an admin, a customer with one registered car, and a small catalog.
/// Does nothing when the catalog already has products.
#[instrument(name = "store::seed", skip(store))]
pub async fn seed_demo_data(store: &dyn ShopStore) -> Result<()> {
  let tx = store.begin().await?;
  if !tx.list_products().await?.is_empty() {
    info!("Store already holds products; skipping seed.");
    tx.rollback().await?;
    return Ok(());
  }

  let admin = Account::new(DEMO_ADMIN_EMAIL, true);
  let customer = Account::new(DEMO_CUSTOMER_EMAIL, false);
  tx.insert_account(&admin).await?;
  tx.insert_account(&customer).await?;

  let now = Utc::now();
  let tyres = [
    ("MICH-PS4-205", "MICH", "Michelin Pilot Sport 4", "205/55R16", "V", 91, 45_000, 20),
    ("BRID-T005-215", "BRID", "Bridgestone Turanza T005", "215/60R16", "H", 95, 38_000, 12),
    ("CONT-CC6-225", "CONT", "Continental CrossContact", "225/65R17", "H", 102, 52_000, 8),
  ];
  for (id, brand_id, description, size, speed, load, price, stock) in tyres {
    tx.insert_tyre(&Tyre {
      id: id.to_string(),
      brand_id: brand_id.to_string(),
      description: description.to_string(),
      car_type: if load > 100 { "SUV" } else { "Passenger" }.to_string(),
      image_link: format!("/images/tyres/{}.png", id.to_lowercase()),
      unit_price: price,
      tyre_size: size.to_string(),
      speed_index: speed.to_string(),
      load_index: load,
      stock,
      status: "Active".to_string(),
      created_by: Some(admin.id),
      created_at: now,
    })
    .await?;
  }

  let services = [
    ("SRV-ALIGN", "ALIGN", "Wheel alignment", 8_000),
    ("SRV-BAL", "BAL", "Wheel balancing", 4_000),
    ("SRV-FIT", "FIT", "Tyre fitting", 2_500),
  ];
  for (id, type_id, description, price) in services {
    tx.insert_service(&Service {
      id: id.to_string(),
      type_id: type_id.to_string(),
      description: description.to_string(),
      car_type: "All".to_string(),
      unit_price: price,
      status: "Active".to_string(),
      created_by: Some(admin.id),
      created_at: now,
    })
    .await?;
  }

  let myvi = tx
    .insert_car_spec(&CarSpecInput {
      brand: "Perodua".to_string(),
      model: "Myvi".to_string(),
      year: 2022,
      tyre_size: "185/55R15".to_string(),
      car_type: CarType::Passenger,
    })
    .await?;
  tx.insert_car_spec(&CarSpecInput {
    brand: "Proton".to_string(),
    model: "X70".to_string(),
    year: 2021,
    tyre_size: "225/65R17".to_string(),
    car_type: CarType::Suv,
  })
  .await?;
  let car = tx.insert_registered_car(customer.id, myvi.id, "WXY 1234").await?;

  tx.commit().await?;
  info!(
    admin_id = %admin.id,
    customer_id = %customer.id,
    car_id = car.id,
    "Demo data seeded."
  );
  Ok(())
}
