use proptest::prelude::*;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use application::service::{
    BorrowCopyService, CreateBookService, CreateUserService, GetCopyService, GetRentService,
    GetUserService, ReturnCopyService,
};
use application::transfer::{
    BorrowCopyDto, CreateBookDto, CreateUserDto, GetCopiesFromBookIdDto, GetCopyDto,
    GetRentsFromCopyIdDto, GetRentsFromUserIdDto, GetUserDto, ReturnCopyDto,
};
use driver::clock::ManualClock;
use driver::database::InMemoryDatabase;
use kernel::LendingError;

const COPIES: usize = 4;
const USERS: usize = 3;

#[derive(Debug, Clone)]
enum Op {
    Borrow { copy: usize, user: usize },
    Return { copy: usize },
    Advance { days: i64 },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..COPIES, 0..USERS).prop_map(|(copy, user)| Op::Borrow { copy, user }),
        3 => (0..COPIES).prop_map(|copy| Op::Return { copy }),
        1 => (1i64..10).prop_map(|days| Op::Advance { days }),
    ]
}

struct Library {
    db: InMemoryDatabase<ManualClock>,
    clock: ManualClock,
    copies: Vec<Uuid>,
    users: Vec<Uuid>,
}

async fn library() -> Library {
    let clock = ManualClock::new(OffsetDateTime::UNIX_EPOCH);
    let db = InMemoryDatabase::with_clock(clock.clone());
    let book_id = db
        .create_book(CreateBookDto {
            title: "title".to_string(),
            author: "author".to_string(),
            publisher: "publisher".to_string(),
            subject: "subject".to_string(),
            isbn: "978-0-00-000000-0".to_string(),
            info: "info".to_string(),
            location: "A-1-1".to_string(),
            amount: COPIES as i32,
        })
        .await
        .unwrap();
    let copies = db
        .get_copies(GetCopiesFromBookIdDto { book_id })
        .await
        .unwrap()
        .into_iter()
        .map(|copy| copy.id)
        .collect();
    let mut users = Vec::new();
    for index in 0..USERS {
        let id = db
            .create_user(CreateUserDto {
                name: format!("reader{index}"),
                // the last user is never confirmed
                confirmed: index + 1 < USERS,
            })
            .await
            .unwrap();
        users.push(id);
    }
    Library {
        db,
        clock,
        copies,
        users,
    }
}

/// Checks that copy flags and rent counts agree with the open rents.
async fn check_consistency(library: &Library) -> Result<(), TestCaseError> {
    let db = &library.db;
    for &copy_id in &library.copies {
        let copy = db.get_copy(GetCopyDto { id: copy_id }).await.unwrap().unwrap();
        let open = db
            .get_rents_from_copy(GetRentsFromCopyIdDto { copy_id })
            .await
            .unwrap()
            .into_iter()
            .filter(|rent| !rent.returned)
            .count();
        prop_assert!(open <= 1);
        prop_assert_eq!(copy.available, open == 0);
    }
    for &user_id in &library.users {
        let user = db.get_user(GetUserDto { id: user_id }).await.unwrap().unwrap();
        let open = db
            .get_rents_from_user(GetRentsFromUserIdDto { user_id })
            .await
            .unwrap()
            .into_iter()
            .filter(|rent| !rent.returned)
            .count();
        prop_assert_eq!(user.rent_count, open as i32);
    }
    Ok(())
}

async fn run(ops: Vec<Op>) -> Result<(), TestCaseError> {
    let library = library().await;
    let db = &library.db;
    for op in ops {
        match op {
            Op::Borrow { copy, user } => {
                let copy_id = library.copies[copy];
                let was_available = db
                    .get_copy(GetCopyDto { id: copy_id })
                    .await
                    .unwrap()
                    .unwrap()
                    .available;
                let result = db
                    .borrow_copy(BorrowCopyDto {
                        copy_id,
                        user_id: library.users[user],
                    })
                    .await;
                match result {
                    Ok(rent) => {
                        prop_assert!(was_available);
                        prop_assert!(rent.due_at > rent.rented_at);
                    }
                    Err(report) => {
                        let error = *report.current_context();
                        prop_assert!(error.is_rejection(), "unexpected failure {error}");
                        if !was_available {
                            prop_assert_eq!(error, LendingError::CopyUnavailable);
                        }
                    }
                }
            }
            Op::Return { copy } => {
                let copy_id = library.copies[copy];
                let was_available = db
                    .get_copy(GetCopyDto { id: copy_id })
                    .await
                    .unwrap()
                    .unwrap()
                    .available;
                match db.return_copy(ReturnCopyDto { copy_id }).await {
                    Ok(rent) => {
                        prop_assert!(!was_available);
                        prop_assert!(rent.returned);
                    }
                    Err(report) => {
                        prop_assert!(was_available);
                        prop_assert_eq!(*report.current_context(), LendingError::AlreadyReturned);
                    }
                }
            }
            Op::Advance { days } => library.clock.advance(Duration::days(days)),
        }
        check_consistency(&library).await?;
    }
    Ok(())
}

proptest! {
    /// Any sequence of borrows and returns keeps copies, counts and rents in agreement.
    #[test]
    fn lending_keeps_state_consistent(ops in prop::collection::vec(op(), 1..40)) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(run(ops))?;
    }

    /// The unconfirmed user never holds a copy.
    #[test]
    fn unconfirmed_user_never_borrows(copies in prop::collection::vec(0..COPIES, 1..10)) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async {
            let library = library().await;
            let user_id = library.users[USERS - 1];
            for copy in copies {
                let result = library
                    .db
                    .borrow_copy(BorrowCopyDto {
                        copy_id: library.copies[copy],
                        user_id,
                    })
                    .await;
                prop_assert!(result.is_err());
            }
            let user = library.db.get_user(GetUserDto { id: user_id }).await.unwrap().unwrap();
            prop_assert_eq!(user.rent_count, 0);
            Ok(())
        })?;
    }
}
