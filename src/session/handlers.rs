use mongodb::bson::oid::ObjectId;
use tracing::debug;

use crate::session::console::{ask_yes_no, parse_amount, Console};
use crate::session::format::{format_created_at, format_usd, short_id};
use crate::storage::UserStore;
use crate::users::{NewUser, UserPatch, UserRecord};

const RULE: &str = "================================================================================";
const DASH: &str = "----------------------------------------";

/// Fetch and print the whole collection. Returns the fetched snapshot so the
/// controller can offer the modify flow against exactly what the user saw.
pub async fn display_users(
    store: &dyn UserStore,
    console: &mut dyn Console,
) -> anyhow::Result<Vec<UserRecord>> {
    let users = store.list().await?;

    console.say("");
    console.say(RULE);
    console.say("CURRENT USERS");
    console.say(RULE);

    if users.is_empty() {
        console.say("No users found in collection");
        return Ok(users);
    }

    console.say(&format!(
        "{:<13} {:<20} {:>14}  {}",
        "ID", "User", "Money", "Created"
    ));
    for user in &users {
        console.say(&format!(
            "{:<13} {:<20} {:>14}  {}",
            short_id(&user.id),
            user.name,
            format_usd(user.money),
            format_created_at(user.created_at),
        ));
    }
    debug!(count = users.len(), "listed users");

    Ok(users)
}

/// Interactive create. Returns the new id, or `None` when the user aborted
/// at the name prompt. Storage failures propagate.
pub async fn create_user(
    store: &dyn UserStore,
    console: &mut dyn Console,
) -> anyhow::Result<Option<ObjectId>> {
    console.say("");
    console.say(DASH);
    console.say("CREATE NEW USER");
    console.say(DASH);

    let name = console.ask("Enter user name:").await?;
    if name.is_empty() {
        console.say("User name cannot be empty");
        return Ok(None);
    }

    let money = loop {
        let input = console.ask("Enter money amount:").await?;
        match parse_amount(&input) {
            Some(amount) => break amount,
            None => console.say("Please enter a valid positive number"),
        }
    };

    // Both inputs were validated above; a failure here is a programming error
    // surfaced through the normal error path, not a user mistake.
    let user = NewUser::new(name, money)?;
    let id = store.insert(user).await?;
    console.say(&format!("User created successfully with ID: {id}"));
    debug!(%id, "created user");

    Ok(Some(id))
}

/// Modify or delete one record out of the previously fetched snapshot. The
/// snapshot may already be stale; a zero affected-count from storage is
/// reported softly instead of failing.
pub async fn modify_user(
    store: &dyn UserStore,
    console: &mut dyn Console,
    users: &[UserRecord],
) -> anyhow::Result<()> {
    console.say("");
    console.say(DASH);
    console.say("MODIFY USER");
    console.say(DASH);

    for (index, user) in users.iter().enumerate() {
        console.say(&format!(
            "[{}] {} - {}",
            index + 1,
            user.name,
            format_usd(user.money)
        ));
    }

    let selection = console
        .ask("\nSelect user number to modify (or 0 to cancel):")
        .await?;
    let selected = match selection.parse::<usize>() {
        Ok(n) if n >= 1 && n <= users.len() => &users[n - 1],
        _ => {
            console.say("Operation cancelled");
            return Ok(());
        }
    };

    console.say(&format!("\nModifying user: {}", selected.name));
    console.say("\nWhat would you like to modify?");
    console.say("[1] User name");
    console.say("[2] Money amount");
    console.say("[3] Both");
    console.say("[4] Delete user");
    let choice = console.ask("Enter choice (1-4):").await?;

    if choice == "4" {
        return delete_user(store, console, selected).await;
    }

    let mut patch = UserPatch::default();

    if choice == "1" || choice == "3" {
        let new_name = console
            .ask(&format!("Enter new name (current: {}):", selected.name))
            .await?;
        // Empty input keeps the current name out of the patch.
        if !new_name.is_empty() {
            patch.set_name(new_name)?;
        }
    }

    if choice == "2" || choice == "3" {
        loop {
            let input = console
                .ask(&format!(
                    "Enter new money amount (current: {}):",
                    selected.money
                ))
                .await?;
            if input.is_empty() {
                break;
            }
            match parse_amount(&input) {
                Some(amount) => {
                    patch.set_money(amount)?;
                    break;
                }
                None => console.say("Please enter a valid positive number"),
            }
        }
    }

    if patch.is_empty() {
        console.say("No updates provided");
        return Ok(());
    }

    let modified = store.update(selected.id, patch).await?;
    if modified > 0 {
        console.say("User updated successfully");
    } else {
        console.say("No changes made");
    }
    debug!(id = %selected.id, modified, "updated user");

    Ok(())
}

async fn delete_user(
    store: &dyn UserStore,
    console: &mut dyn Console,
    user: &UserRecord,
) -> anyhow::Result<()> {
    let confirmed = ask_yes_no(
        console,
        &format!("Are you sure you want to delete user \"{}\"?", user.name),
    )
    .await?;
    if !confirmed {
        console.say("Deletion cancelled");
        return Ok(());
    }

    let deleted = store.delete(user.id).await?;
    if deleted > 0 {
        console.say("User deleted successfully");
    } else {
        console.say("No changes made");
    }
    debug!(id = %user.id, deleted, "deleted user");

    Ok(())
}
