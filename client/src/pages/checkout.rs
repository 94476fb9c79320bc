//! Checkout page and the hosted provider's return page.
//!
//! SYSTEM CONTEXT
//! ==============
//! The pending [`CheckoutDraft`] is read from `sessionStorage`, where the
//! results page left it; it survives the hosted provider's full-page
//! redirect. Both payment methods end in [`finish_checkout`], the single
//! confirmation step.
//!
//! DESIGN
//! ======
//! The [`Checkout`] state machine lives in a signal and every view below is
//! derived from its phase. Async steps run on a copy that is written back
//! whatever the outcome, so a failed step is visible as `Failed`.
//!
//! The wallet buttons are rendered only after the guest picks that method,
//! which is when the attempt is claimed for it. Closing the wallet popup
//! releases the claim.

#[cfg(test)]
#[path = "checkout_test.rs"]
mod checkout_test;

use booking::checkout::{
    CHECKOUT_DRAFT_KEY, CapturedPayment, Checkout, CheckoutDraft, CheckoutPhase, PaymentMethod, Quote, hosted_return,
};
use booking::model::format_money;
use booking::receipt::Receipt;
use booking::{BookingError, Capability};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::components::guard::RequireCapability;
use crate::net::api::GlooApi;
use crate::state::app::{AppState, Notice};
use crate::util::{download, paypal, redirect_to, storage};

const WALLET_CONTAINER_ID: &str = "paypal-buttons";

/// Query keys the hosted provider may append to the return URL.
const RETURN_KEYS: [&str; 4] = ["status", "collection_status", "payment_id", "collection_id"];

/// Label/value lines of the stay summary.
fn stay_summary(draft: &CheckoutDraft, quote: &Quote) -> Vec<(&'static str, String)> {
    vec![
        ("Room", format!("{} {}", draft.room.room_type.label(), draft.room.number)),
        ("Check-in", draft.start.to_string()),
        ("Check-out", draft.end.to_string()),
        ("Nights", quote.nights.to_string()),
        ("Nightly rate", format_money(quote.price_per_night)),
        ("Total", format_money(quote.total)),
    ]
}

/// Collect the provider's return parameters present on the URL.
fn return_params(lookup: impl Fn(&str) -> Option<String>) -> Vec<(&'static str, String)> {
    RETURN_KEYS.iter().filter_map(|key| lookup(key).map(|value| (*key, value))).collect()
}

/// Which panel the checkout page shows. A change of payment claim keeps the
/// same panel, so the wallet container is not rebuilt under the SDK.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Preparing,
    Paying,
    Confirming,
    Done,
    Failed,
}

impl Stage {
    fn of(phase: &CheckoutPhase) -> Self {
        match phase {
            CheckoutPhase::Idle | CheckoutPhase::ComputingTotal => Self::Preparing,
            CheckoutPhase::AwaitingPayment { .. } => Self::Paying,
            CheckoutPhase::ConfirmingReservation { .. } => Self::Confirming,
            CheckoutPhase::Done(_) => Self::Done,
            CheckoutPhase::Failed(_) => Self::Failed,
        }
    }
}

fn load_draft() -> Option<CheckoutDraft> {
    storage::load_session_item(CHECKOUT_DRAFT_KEY).and_then(|raw| CheckoutDraft::from_json(&raw))
}

/// Create the reservation for a captured payment and record the result.
async fn finish_checkout(app: AppState, checkout: RwSignal<Checkout>, payment: CapturedPayment) {
    let session = app.session.get_untracked();
    let mut next = checkout.get_untracked();
    let result = next.confirm(&GlooApi::from_config(), &session, payment).await;
    checkout.set(next);
    match result {
        Ok(receipt) => {
            storage::remove_session_item(CHECKOUT_DRAFT_KEY);
            app.notify(Notice::success("Reservation confirmed", format!("Payment {} received.", receipt.payment_reference)));
        }
        Err(err) => {
            if matches!(err, BookingError::PaidNotBooked { .. }) {
                storage::remove_session_item(CHECKOUT_DRAFT_KEY);
            }
            app.fail(&err);
        }
    }
}

#[component]
pub fn CheckoutPage(app: AppState) -> impl IntoView {
    view! {
        <RequireCapability app capability=Capability::BookRooms>
            {move || match load_draft() {
                Some(draft) => view! { <CheckoutFlow app draft/> }.into_any(),
                None => view! { <NoPendingCheckout/> }.into_any(),
            }}
        </RequireCapability>
    }
}

#[component]
fn NoPendingCheckout() -> impl IntoView {
    view! {
        <section class="page">
            <p class="page__empty">"There is no checkout in progress. " <a href="/">"Search for a room"</a></p>
        </section>
    }
}

#[component]
fn CheckoutFlow(app: AppState, draft: CheckoutDraft) -> impl IntoView {
    let mut attempt = Checkout::new(draft);
    if let Err(err) = attempt.quote() {
        log::warn!("checkout draft rejected: {err}");
    }
    let checkout = RwSignal::new(attempt);
    let stage = Memo::new(move |_| checkout.with(|c| Stage::of(c.phase())));
    let busy = RwSignal::new(false);

    let pay_hosted = move |_| {
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        leptos::task::spawn_local(async move {
            let session = app.session.get_untracked();
            let mut next = checkout.get_untracked();
            let result = next.start_hosted_payment(&GlooApi::from_config(), &session).await;
            checkout.set(next);
            match result {
                Ok(url) => redirect_to(&url),
                Err(err) => {
                    busy.set(false);
                    app.fail(&err);
                }
            }
        });
    };

    let pay_wallet = move |_| {
        let session = app.session.get_untracked();
        let order = checkout.try_update(|c| c.wallet_order(&session));
        let order = match order {
            Some(Ok(order)) => order,
            Some(Err(err)) => {
                app.fail(&err);
                return;
            }
            None => return,
        };
        let rendered = paypal::render_buttons(
            WALLET_CONTAINER_ID,
            &order,
            move |reference| {
                let payment = CapturedPayment { method: PaymentMethod::EmbeddedWallet, reference };
                leptos::task::spawn_local(finish_checkout(app, checkout, payment));
            },
            move || {
                if checkout.try_update(|c| c.payment_cancelled(PaymentMethod::EmbeddedWallet)) == Some(true) {
                    app.notify(Notice::info("Payment cancelled", "No payment was taken. Choose a method to try again."));
                }
            },
            move |reason| {
                if let Some(err) = checkout.try_update(|c| c.payment_failed(reason)) {
                    app.fail(&err);
                }
            },
        );
        if let Err(reason) = rendered {
            if let Some(err) = checkout.try_update(|c| c.payment_failed(reason)) {
                app.fail(&err);
            }
        }
    };

    let cancel = move |_| {
        storage::remove_session_item(CHECKOUT_DRAFT_KEY);
        app.notify(Notice::info("Checkout cancelled", "No payment was taken."));
    };

    view! {
        <section class="page page--checkout">
            <h1>"Checkout"</h1>
            {move || match stage.get() {
                Stage::Preparing => view! { <p class="page__loading">"Preparing your stay..."</p> }.into_any(),
                Stage::Paying => {
                    let summary = checkout.with_untracked(|c| match c.phase() {
                        CheckoutPhase::AwaitingPayment { quote, .. } => stay_summary(c.draft(), quote),
                        _ => Vec::new(),
                    });
                    let claimed = move || checkout.with(Checkout::claimed_method);
                    view! {
                        <StaySummary summary/>
                        <div class="checkout__methods">
                            <button
                                class="btn btn--primary"
                                disabled=move || busy.get() || claimed() == Some(PaymentMethod::EmbeddedWallet)
                                on:click=pay_hosted
                            >
                                "Pay with "{PaymentMethod::HostedRedirect.label()}
                            </button>
                            <button
                                class="btn"
                                disabled=move || claimed().is_some()
                                on:click=pay_wallet
                            >
                                "Pay with "{PaymentMethod::EmbeddedWallet.label()}
                            </button>
                            <a class="btn btn--link" href="/" on:click=cancel>"Cancel"</a>
                        </div>
                        <div id=WALLET_CONTAINER_ID class="checkout__wallet"></div>
                    }
                    .into_any()
                }
                Stage::Confirming => {
                    view! { <p class="page__loading">"Payment received. Confirming your reservation..."</p> }.into_any()
                }
                Stage::Done | Stage::Failed => match checkout.with_untracked(|c| c.phase().clone()) {
                    CheckoutPhase::Done(receipt) => view! { <ReceiptPanel receipt/> }.into_any(),
                    CheckoutPhase::Failed(err) => view! { <CheckoutFailed err/> }.into_any(),
                    _ => ().into_any(),
                },
            }}
        </section>
    }
}

#[component]
fn StaySummary(summary: Vec<(&'static str, String)>) -> impl IntoView {
    view! {
        <dl class="summary">
            {summary
                .into_iter()
                .map(|(label, value)| view! {
                    <dt>{label}</dt>
                    <dd>{value}</dd>
                })
                .collect_view()}
        </dl>
    }
}

#[component]
fn ReceiptPanel(receipt: Receipt) -> impl IntoView {
    let navigate = use_navigate();
    let text = receipt.render_text();
    let file_name = receipt.file_name();
    let preview = text.clone();

    let download_and_continue = move |_| {
        if let Err(err) = download::download_text(&file_name, "text/plain", &text) {
            log::warn!("receipt download failed: {err}");
        }
        navigate("/reservations", NavigateOptions::default());
    };

    view! {
        <article class="receipt">
            <h2>"Your reservation is confirmed"</h2>
            <pre class="receipt__text">{preview}</pre>
            <div class="form__actions">
                <button class="btn btn--primary" on:click=download_and_continue>"Download receipt"</button>
                <a class="btn" href="/reservations">"My reservations"</a>
            </div>
        </article>
    }
}

#[component]
fn CheckoutFailed(err: BookingError) -> impl IntoView {
    let paid = matches!(err, BookingError::PaidNotBooked { .. });
    view! {
        <div class="checkout__failed">
            <p class="page__error">{err.user_message()}</p>
            {if paid {
                view! { <a class="btn" href="/reservations">"My reservations"</a> }.into_any()
            } else {
                view! { <a class="btn" href="/results">"Back to results"</a> }.into_any()
            }}
        </div>
    }
}

/// Landing page for the hosted provider's redirect back.
#[component]
pub fn CheckoutReturnPage(app: AppState) -> impl IntoView {
    view! {
        <RequireCapability app capability=Capability::BookRooms>
            {move || match load_draft() {
                Some(draft) => view! { <HostedReturn app draft/> }.into_any(),
                None => view! { <NoPendingCheckout/> }.into_any(),
            }}
        </RequireCapability>
    }
}

#[component]
fn HostedReturn(app: AppState, draft: CheckoutDraft) -> impl IntoView {
    let query = use_query_map();
    let params = query.with_untracked(|q| return_params(|key| q.get(key)));

    let mut attempt = Checkout::new(draft);
    let quoted = attempt.quote();
    let checkout = RwSignal::new(attempt);

    match (quoted, hosted_return(params)) {
        (Err(err), _) => app.fail(&err),
        (Ok(_), Ok(payment)) => leptos::task::spawn_local(finish_checkout(app, checkout, payment)),
        (Ok(_), Err(err)) => {
            let err = match err {
                BookingError::PaymentFailed(reason) => checkout.try_update(|c| c.payment_failed(reason)),
                other => Some(other),
            };
            if let Some(err) = err {
                app.fail(&err);
            }
        }
    }

    view! {
        <section class="page page--checkout">
            <h1>"Checkout"</h1>
            {move || match checkout.with(|c| c.phase().clone()) {
                CheckoutPhase::Done(receipt) => view! { <ReceiptPanel receipt/> }.into_any(),
                CheckoutPhase::Failed(err) => view! { <CheckoutFailed err/> }.into_any(),
                _ => view! { <p class="page__loading">"Confirming your payment..."</p> }.into_any(),
            }}
        </section>
    }
}
