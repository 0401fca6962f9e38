// src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{admin_handlers, car_handlers, cart_handlers, checkout_handlers, product_handlers};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1")
      .route("/health", web::get().to(health_check_handler))
      .service(
        web::scope("/products")
          .route("", web::get().to(product_handlers::list_products_handler))
          .route("/{product_id}", web::get().to(product_handlers::get_product_handler)),
      )
      .service(
        web::scope("/cart")
          .route("", web::get().to(cart_handlers::list_cart_handler))
          .route("", web::delete().to(cart_handlers::clear_cart_handler))
          .route("/items", web::post().to(cart_handlers::add_to_cart_handler))
          .route("/items/{product_id}", web::put().to(cart_handlers::update_cart_item_handler))
          .route("/items/{product_id}", web::delete().to(cart_handlers::remove_cart_item_handler)),
      )
      .route("/checkout", web::post().to(checkout_handlers::checkout_handler))
      .service(
        web::scope("/orders")
          .route("", web::get().to(checkout_handlers::list_orders_handler))
          .route("/{order_id}", web::get().to(checkout_handlers::get_order_handler)),
      )
      .service(
        web::scope("/cars")
          .route("", web::get().to(car_handlers::list_cars_handler))
          .route("", web::post().to(car_handlers::register_car_handler))
          .route("/specs", web::get().to(car_handlers::list_specs_handler))
          .route("/specs", web::post().to(car_handlers::create_spec_handler))
          .route("/specs/{id}", web::get().to(car_handlers::get_spec_handler))
          .route("/specs/{id}", web::put().to(car_handlers::update_spec_handler))
          .route("/specs/{id}", web::delete().to(car_handlers::delete_spec_handler)),
      )
      .service(
        web::scope("/admin")
          .route("/services", web::post().to(product_handlers::add_service_handler))
          .route("/services", web::put().to(product_handlers::update_service_handler))
          .route("/tyres", web::post().to(product_handlers::add_tyre_handler))
          .route("/tyres", web::put().to(product_handlers::update_tyre_handler))
          .route("/accounts", web::get().to(admin_handlers::list_accounts_handler))
          .route("/accounts/{id}/admin", web::put().to(admin_handlers::set_admin_handler))
          .route("/notifications", web::get().to(admin_handlers::notifications_handler))
          .route("/carts", web::get().to(cart_handlers::find_cart_lines_handler))
          .service(
            web::scope("/reports")
              .route("/sales-and-orders", web::get().to(admin_handlers::sales_and_orders_handler))
              .route("/registered-users", web::get().to(admin_handlers::registered_users_handler))
              .route("/order-statistics", web::get().to(admin_handlers::order_statistics_handler))
              .route("/dashboard", web::get().to(admin_handlers::dashboard_handler)),
          ),
      ),
  );
}
