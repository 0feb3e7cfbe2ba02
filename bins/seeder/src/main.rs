//! Database seeder for Claimdesk development and testing.
//!
//! Seeds the default approver admin, two departments, and a small staff
//! hierarchy for local development.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use claimdesk_core::auth::hash_password;
use claimdesk_db::entities::{
    departments,
    sea_orm_active_enums::UserRole,
    users,
};

/// Admin ID (consistent for all seeds)
const ADMIN_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Engineering department ID
const ENGINEERING_ID: &str = "00000000-0000-0000-0000-000000000010";
/// Operations department ID
const OPERATIONS_ID: &str = "00000000-0000-0000-0000-000000000011";
/// Engineering manager ID
const MANAGER_ID: &str = "00000000-0000-0000-0000-000000000002";
/// First employee ID (reports to the manager)
const EMPLOYEE_ID: &str = "00000000-0000-0000-0000-000000000003";
/// Second employee ID (no manager assigned)
const UNASSIGNED_EMPLOYEE_ID: &str = "00000000-0000-0000-0000-000000000004";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = claimdesk_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding admin...");
    seed_user(
        &db,
        ADMIN_ID,
        "admin@claimdesk.dev",
        "Portal Admin",
        UserRole::Admin,
        None,
        None,
    )
    .await;

    // Departments are created unmanaged; the manager row has to exist first.
    println!("Seeding departments...");
    seed_department(&db, ENGINEERING_ID, "Engineering").await;
    seed_department(&db, OPERATIONS_ID, "Operations").await;

    println!("Seeding staff...");
    seed_user(
        &db,
        MANAGER_ID,
        "manager@claimdesk.dev",
        "Erin Manager",
        UserRole::Manager,
        Some(uuid(ENGINEERING_ID)),
        None,
    )
    .await;
    seed_user(
        &db,
        EMPLOYEE_ID,
        "employee@claimdesk.dev",
        "Sam Employee",
        UserRole::Employee,
        Some(uuid(ENGINEERING_ID)),
        Some(uuid(MANAGER_ID)),
    )
    .await;
    seed_user(
        &db,
        UNASSIGNED_EMPLOYEE_ID,
        "newhire@claimdesk.dev",
        "Noor Newhire",
        UserRole::Employee,
        Some(uuid(OPERATIONS_ID)),
        None,
    )
    .await;

    println!("Assigning department managers...");
    set_department_manager(&db, ENGINEERING_ID, uuid(MANAGER_ID)).await;

    println!("Seeding complete!");
    println!("  All accounts use the password: password123");
}

fn uuid(s: &str) -> Uuid {
    Uuid::parse_str(s).unwrap()
}

/// Seeds a user if the ID is not already present.
async fn seed_user(
    db: &DatabaseConnection,
    id: &str,
    email: &str,
    full_name: &str,
    role: UserRole,
    department_id: Option<Uuid>,
    manager_id: Option<Uuid>,
) {
    if users::Entity::find_by_id(uuid(id))
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  {email} already exists, skipping...");
        return;
    }

    let password_hash = hash_password("password123").expect("Failed to hash seed password");
    let now = Utc::now().into();
    let user = users::ActiveModel {
        id: Set(uuid(id)),
        email: Set(email.to_string()),
        password_hash: Set(password_hash),
        full_name: Set(full_name.to_string()),
        role: Set(role),
        department_id: Set(department_id),
        manager_id: Set(manager_id),
        created_at: Set(now),
        updated_at: Set(now),
    };

    if let Err(e) = user.insert(db).await {
        eprintln!("Failed to insert {email}: {e}");
    } else {
        println!("  Created {email}");
    }
}

/// Seeds a department if the ID is not already present.
async fn seed_department(db: &DatabaseConnection, id: &str, name: &str) {
    if departments::Entity::find_by_id(uuid(id))
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  {name} already exists, skipping...");
        return;
    }

    let now = Utc::now().into();
    let department = departments::ActiveModel {
        id: Set(uuid(id)),
        name: Set(name.to_string()),
        manager_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };

    if let Err(e) = department.insert(db).await {
        eprintln!("Failed to insert {name}: {e}");
    } else {
        println!("  Created {name}");
    }
}

/// Points a department at its manager once the user row exists.
async fn set_department_manager(db: &DatabaseConnection, department_id: &str, manager_id: Uuid) {
    let Ok(Some(department)) = departments::Entity::find_by_id(uuid(department_id)).one(db).await
    else {
        eprintln!("Department {department_id} not found");
        return;
    };

    let mut active: departments::ActiveModel = department.into();
    active.manager_id = Set(Some(manager_id));
    active.updated_at = Set(Utc::now().into());

    if let Err(e) = active.update(db).await {
        eprintln!("Failed to set department manager: {e}");
    }
}
