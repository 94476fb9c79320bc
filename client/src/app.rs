//! Root application component with routing.
//!
//! The [`AppState`] built here is handed to every page as a prop. Static
//! segments are listed before parameter segments that share a prefix.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::dialog::NoticeDialog;
use crate::components::nav::Nav;
use crate::pages::{
    admin_room::AdminRoomPage,
    admin_rooms::AdminRoomsPage,
    analyst_charts::AnalystChartsPage,
    analyst_table::AnalystTablePage,
    checkout::{CheckoutPage, CheckoutReturnPage},
    edit_reservation::EditReservationPage,
    home::HomePage,
    login::LoginPage,
    not_found::NotFoundPage,
    reservations::ReservationsPage,
    results::ResultsPage,
    room_detail::RoomDetailPage,
    room_form::{EditRoomPage, NewRoomPage},
};
use crate::state::app::AppState;

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    let app = AppState::load();

    view! {
        <Title text="Hotel booking"/>

        <Router>
            <Nav app/>
            <main class="main">
                <Routes fallback=NotFoundPage>
                    <Route path=StaticSegment("") view=move || view! { <HomePage app/> }/>
                    <Route path=StaticSegment("login") view=move || view! { <LoginPage app/> }/>
                    <Route path=StaticSegment("results") view=move || view! { <ResultsPage app/> }/>
                    <Route path=(StaticSegment("rooms"), ParamSegment("id")) view=RoomDetailPage/>
                    <Route path=StaticSegment("reservations") view=move || view! { <ReservationsPage app/> }/>
                    <Route
                        path=(StaticSegment("reservations"), StaticSegment("edit"))
                        view=move || view! { <EditReservationPage app/> }
                    />
                    <Route path=StaticSegment("checkout") view=move || view! { <CheckoutPage app/> }/>
                    <Route
                        path=(StaticSegment("checkout"), StaticSegment("return"))
                        view=move || view! { <CheckoutReturnPage app/> }
                    />
                    <Route
                        path=(StaticSegment("admin"), StaticSegment("rooms"))
                        view=move || view! { <AdminRoomsPage app/> }
                    />
                    <Route
                        path=(StaticSegment("admin"), StaticSegment("rooms"), StaticSegment("new"))
                        view=move || view! { <NewRoomPage app/> }
                    />
                    <Route
                        path=(StaticSegment("admin"), StaticSegment("rooms"), ParamSegment("id"), StaticSegment("edit"))
                        view=move || view! { <EditRoomPage app/> }
                    />
                    <Route
                        path=(StaticSegment("admin"), StaticSegment("rooms"), ParamSegment("id"))
                        view=move || view! { <AdminRoomPage app/> }
                    />
                    <Route path=StaticSegment("analyst") view=move || view! { <AnalystTablePage app/> }/>
                    <Route
                        path=(StaticSegment("analyst"), StaticSegment("charts"))
                        view=move || view! { <AnalystChartsPage app/> }
                    />
                </Routes>
            </main>
            <NoticeDialog app/>
        </Router>
    }
}
