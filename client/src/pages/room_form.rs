//! Shared create/edit room form.
//!
//! Edit mode pre-populates from `GET /cuartos/{id}`; both modes validate with
//! [`RoomForm::validate`] before anything is sent.

use booking::admin::{MAX_CAPACITY, RoomForm, RoomFormMode, load_room_for_edit, save_room};
use booking::{BookingError, Capability, RoomType, ValidationErrors};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::field_message::FieldMessage;
use crate::components::guard::RequireCapability;
use crate::net::api::GlooApi;
use crate::pages::room_detail::route_id;
use crate::state::app::{AppState, Notice};

#[component]
pub fn NewRoomPage(app: AppState) -> impl IntoView {
    view! {
        <RequireCapability app capability=Capability::ManageRooms>
            <RoomFormView app mode=RoomFormMode::Create/>
        </RequireCapability>
    }
}

#[component]
pub fn EditRoomPage(app: AppState) -> impl IntoView {
    let params = use_params_map();
    view! {
        <RequireCapability app capability=Capability::ManageRooms>
            {move || match route_id(params.with(|p| p.get("id"))) {
                Some(id) => view! { <RoomFormView app mode=RoomFormMode::Edit(id)/> }.into_any(),
                None => view! { <p class="page__error">"Unknown room."</p> }.into_any(),
            }}
        </RequireCapability>
    }
}

#[component]
fn RoomFormView(app: AppState, mode: RoomFormMode) -> impl IntoView {
    let navigate = use_navigate();
    let form = RwSignal::new(RoomForm::default());
    let errors = RwSignal::new(ValidationErrors::default());
    let busy = RwSignal::new(false);
    let loading = RwSignal::new(matches!(mode, RoomFormMode::Edit(_)));

    if let RoomFormMode::Edit(id) = mode {
        leptos::task::spawn_local(async move {
            let session = app.session.get_untracked();
            match load_room_for_edit(&GlooApi::from_config(), &session, id).await {
                Ok(loaded) => form.set(loaded),
                Err(err) => app.fail(&err),
            }
            loading.set(false);
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() || loading.get_untracked() {
            return;
        }
        busy.set(true);
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let session = app.session.get_untracked();
            let current = form.get_untracked();
            match save_room(&GlooApi::from_config(), &session, mode, &current).await {
                Ok(message) => {
                    errors.set(ValidationErrors::default());
                    app.notify(Notice::success("Saved", message));
                    navigate("/admin/rooms", NavigateOptions::default());
                }
                Err(BookingError::Invalid(invalid)) => errors.set(invalid),
                Err(err) => app.fail(&err),
            }
            busy.set(false);
        });
    };

    let title = match mode {
        RoomFormMode::Create => "New room".to_owned(),
        RoomFormMode::Edit(id) => format!("Edit room #{id}"),
    };

    view! {
        <section class="page page--room-form">
            <h1>{title}</h1>
            <form class="form" on:submit=on_submit novalidate=true>
                <TextInput label="Number" kind="number" form errors field="number"
                    get=|f| f.number.clone() set=|f, v| f.number = v/>
                <label class="field">
                    <span class="field__label">"Type"</span>
                    <select
                        class="field__input"
                        on:change=move |ev| form.update(|f| f.room_type = event_target_value(&ev))
                    >
                        <option value="" selected=move || form.with(|f| f.room_type.is_empty())>"Select"</option>
                        {RoomType::ALL
                            .iter()
                            .map(|t| {
                                let t = *t;
                                view! {
                                    <option
                                        value=t.as_str()
                                        selected=move || form.with(|f| RoomType::parse(&f.room_type) == Some(t))
                                    >
                                        {t.label()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                    <FieldMessage errors field="room_type"/>
                </label>
                <TextInput label=format!("Capacity (1-{MAX_CAPACITY})") kind="number" form errors field="capacity"
                    get=|f| f.capacity.clone() set=|f, v| f.capacity = v/>
                <TextInput label="Price per night" kind="number" form errors field="price"
                    get=|f| f.price.clone() set=|f, v| f.price = v/>
                <TextInput label="Description" form errors field="description"
                    get=|f| f.description.clone() set=|f, v| f.description = v/>
                <TextInput label="Image URL" kind="url" form errors field="image_url"
                    get=|f| f.image_url.clone() set=|f, v| f.image_url = v/>
                <div class="form__actions">
                    <a class="btn" href="/admin/rooms">"Back"</a>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get() || loading.get()>
                        "Save"
                    </button>
                </div>
            </form>
        </section>
    }
}

#[component]
fn TextInput(
    #[prop(into)] label: String,
    #[prop(default = "text")] kind: &'static str,
    form: RwSignal<RoomForm>,
    errors: RwSignal<ValidationErrors>,
    field: &'static str,
    get: fn(&RoomForm) -> String,
    set: fn(&mut RoomForm, String),
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field__label">{label}</span>
            <input
                class="field__input"
                type=kind
                prop:value=move || form.with(get)
                on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
            />
            <FieldMessage errors field/>
        </label>
    }
}
