use uuid::Uuid;

use crate::cart::Cart;
use crate::data_types::api_data_types::{Order, OrderRequest};
use crate::data_types::{ApiError, CheckoutError, MealCategory};

/// Identifies one submission attempt. Completions carrying a token that is no
/// longer current (retried flow, view torn down and rebuilt) are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionToken(Uuid);

#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutState {
    Idle,
    PendingConfirmation,
    Submitting { token: SubmissionToken, total: f64 },
    Success { order: Order, total: f64 },
    Failed { message: String },
}

/// Linear checkout workflow:
/// `Idle -> PendingConfirmation -> Submitting -> Success | Failed -> Idle`.
///
/// The machine never performs network I/O itself. `confirm` hands the caller
/// a frozen [`OrderRequest`] plus a token, the caller runs the request, and
/// reports back through [`Checkout::complete`]. That keeps the in-flight
/// snapshot immune to cart mutations and makes every transition testable.
#[derive(Debug, Default)]
pub struct Checkout {
    state: CheckoutState,
}

impl Default for CheckoutState {
    fn default() -> Self {
        CheckoutState::Idle
    }
}

impl Checkout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Open the confirmation step. The balance check here is advisory only,
    /// the server re-validates on submit.
    pub fn begin(&mut self, cart: &Cart, wallet_balance: f64) -> Result<(), CheckoutError> {
        match self.state {
            CheckoutState::Idle => {}
            CheckoutState::Submitting { .. } => return Err(CheckoutError::SubmissionInFlight),
            _ => return Err(CheckoutError::NotIdle),
        }
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        if cart.total() > wallet_balance {
            return Err(CheckoutError::InsufficientBalance);
        }
        self.state = CheckoutState::PendingConfirmation;
        Ok(())
    }

    /// Back out of the confirmation dialog; the cart is untouched.
    pub fn cancel(&mut self) {
        if self.state == CheckoutState::PendingConfirmation {
            self.state = CheckoutState::Idle;
        }
    }

    /// Freeze the cart and the currently active category into an order
    /// request. Only one submission may be in flight at a time.
    pub fn confirm(
        &mut self,
        cart: &Cart,
        student_id: &str,
        active_category: MealCategory,
    ) -> Result<(SubmissionToken, OrderRequest), CheckoutError> {
        match self.state {
            CheckoutState::PendingConfirmation => {}
            CheckoutState::Submitting { .. } => return Err(CheckoutError::SubmissionInFlight),
            _ => return Err(CheckoutError::NotPendingConfirmation),
        }

        let token = SubmissionToken(Uuid::new_v4());
        let request = OrderRequest {
            student_id: student_id.to_string(),
            items: cart.to_order_items(),
            order_type: active_category,
        };
        self.state = CheckoutState::Submitting {
            token,
            total: cart.total(),
        };
        Ok((token, request))
    }

    /// Report the outcome of the submission the token belongs to. On success
    /// the cart is cleared; on failure it is preserved so nothing is lost.
    /// Returns false (and changes nothing) for a stale or unknown token.
    pub fn complete(
        &mut self,
        token: SubmissionToken,
        result: Result<Order, ApiError>,
        cart: &mut Cart,
    ) -> bool {
        let total = match self.state {
            CheckoutState::Submitting {
                token: current,
                total,
            } if current == token => total,
            _ => {
                log::debug!("discarding completion for stale submission");
                return false;
            }
        };

        self.state = match result {
            Ok(order) => {
                cart.clear();
                CheckoutState::Success { order, total }
            }
            Err(e) => CheckoutState::Failed {
                message: e.user_message(),
            },
        };
        true
    }

    /// Dismiss the success or failure notice and return to `Idle`.
    pub fn acknowledge(&mut self) {
        if matches!(
            self.state,
            CheckoutState::Success { .. } | CheckoutState::Failed { .. }
        ) {
            self.state = CheckoutState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::api_data_types::MenuItem;

    fn menu_item(id: &str, price: f64) -> MenuItem {
        MenuItem {
            id: id.into(),
            name: format!("item-{id}"),
            price,
            category: MealCategory::Lunch,
            image_url: String::new(),
        }
    }

    fn filled_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(&menu_item("a", 50.0));
        cart
    }

    fn echoed_order(request: &OrderRequest) -> Order {
        Order {
            id: "order-1".into(),
            student_id: request.student_id.clone(),
            items: request.items.clone(),
            order_type: request.order_type,
            created_at: "2026-08-25T12:00:00.000Z".into(),
        }
    }

    #[test]
    fn empty_cart_is_blocked_before_any_request() {
        let mut checkout = Checkout::new();
        let cart = Cart::new();
        assert_eq!(
            checkout.begin(&cart, 1000.0),
            Err(CheckoutError::EmptyCart)
        );
        assert_eq!(*checkout.state(), CheckoutState::Idle);
    }

    #[test]
    fn insufficient_balance_is_blocked_before_any_request() {
        let mut checkout = Checkout::new();
        let cart = filled_cart(); // total 50
        assert_eq!(
            checkout.begin(&cart, 30.0),
            Err(CheckoutError::InsufficientBalance)
        );
        assert_eq!(*checkout.state(), CheckoutState::Idle);
    }

    #[test]
    fn cancel_returns_to_idle_with_cart_untouched() {
        let mut checkout = Checkout::new();
        let cart = filled_cart();
        checkout.begin(&cart, 100.0).unwrap();
        checkout.cancel();
        assert_eq!(*checkout.state(), CheckoutState::Idle);
        assert_eq!(cart.total(), 50.0);
    }

    #[test]
    fn snapshot_is_immune_to_later_cart_mutations() {
        let mut checkout = Checkout::new();
        let mut cart = filled_cart();
        checkout.begin(&cart, 100.0).unwrap();
        let (_, request) = checkout
            .confirm(&cart, "s1", MealCategory::Lunch)
            .unwrap();

        cart.add_item(&menu_item("b", 20.0));
        cart.update_quantity(0, 9);

        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items[0].quantity, 1);
    }

    #[test]
    fn success_clears_cart_and_records_frozen_total() {
        let mut checkout = Checkout::new();
        let mut cart = filled_cart();
        checkout.begin(&cart, 100.0).unwrap();
        let (token, request) = checkout
            .confirm(&cart, "s1", MealCategory::Lunch)
            .unwrap();

        assert!(checkout.complete(token, Ok(echoed_order(&request)), &mut cart));
        assert!(cart.is_empty());
        match checkout.state() {
            CheckoutState::Success { order, total } => {
                assert_eq!(order.id, "order-1");
                assert_eq!(*total, 50.0);
            }
            other => panic!("expected Success, got {other:?}"),
        }

        checkout.acknowledge();
        assert_eq!(*checkout.state(), CheckoutState::Idle);
    }

    #[test]
    fn failure_preserves_cart_exactly() {
        let mut checkout = Checkout::new();
        let mut cart = filled_cart();
        let before = cart.clone();

        checkout.begin(&cart, 100.0).unwrap();
        let (token, _) = checkout
            .confirm(&cart, "s1", MealCategory::Lunch)
            .unwrap();

        let err = ApiError::Backend {
            status: 400,
            message: "Insufficient balance".into(),
        };
        assert!(checkout.complete(token, Err(err), &mut cart));

        assert_eq!(cart, before);
        assert_eq!(
            *checkout.state(),
            CheckoutState::Failed {
                message: "Insufficient balance".into()
            }
        );

        // user may retry from the top
        checkout.acknowledge();
        assert!(checkout.begin(&cart, 100.0).is_ok());
    }

    #[test]
    fn only_one_submission_in_flight() {
        let mut checkout = Checkout::new();
        let cart = filled_cart();
        checkout.begin(&cart, 100.0).unwrap();
        checkout
            .confirm(&cart, "s1", MealCategory::Lunch)
            .unwrap();

        assert_eq!(
            checkout.begin(&cart, 100.0),
            Err(CheckoutError::SubmissionInFlight)
        );
        assert_eq!(
            checkout.confirm(&cart, "s1", MealCategory::Lunch).unwrap_err(),
            CheckoutError::SubmissionInFlight
        );
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut checkout = Checkout::new();
        let mut cart = filled_cart();
        checkout.begin(&cart, 100.0).unwrap();
        let (old_token, old_request) = checkout
            .confirm(&cart, "s1", MealCategory::Lunch)
            .unwrap();

        // first attempt fails, user retries
        let err = ApiError::Backend {
            status: 500,
            message: "server hiccup".into(),
        };
        assert!(checkout.complete(old_token, Err(err), &mut cart));
        checkout.acknowledge();
        checkout.begin(&cart, 100.0).unwrap();
        let (new_token, new_request) = checkout
            .confirm(&cart, "s1", MealCategory::Lunch)
            .unwrap();

        // the old response arrives late and must not clear the cart
        assert!(!checkout.complete(old_token, Ok(echoed_order(&old_request)), &mut cart));
        assert!(!cart.is_empty());

        assert!(checkout.complete(new_token, Ok(echoed_order(&new_request)), &mut cart));
        assert!(cart.is_empty());
    }
}
