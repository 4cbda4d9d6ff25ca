mod common;

use applink_core::ActivationState;
use applink_protocol::hmi::{
    HmiCommand, HmiMethod, HmiNotification, HmiOutbound, HmiRequestPayload, HmiResponse,
    HmiResult,
};
use applink_protocol::v1::{
    RegisterAppInterfaceV1, ShowV1, V1Notification, V1Request, V1Response,
};
use applink_protocol::v2::{RegisterAppInterfaceV2, V2Notification, V2Request};
use applink_protocol::{
    ButtonName, ButtonPressMode, Choice, DriverDistractionState, HmiLevel, Language, MenuParams,
    ResultCode, RpcNotification, RpcRequest, RpcResponse, SyncMsgVersion, TriggerSource,
};
use common::Harness;

fn register_v1(app_name: &str, is_media: bool) -> RpcRequest {
    RpcRequest::V1(V1Request::RegisterAppInterface(RegisterAppInterfaceV1 {
        app_name: app_name.to_string(),
        ngn_media_screen_app_name: None,
        vr_synonyms: None,
        uses_vehicle_data: None,
        is_media_application: is_media,
        language_desired: Language::EnUs,
        sync_msg_version: SyncMsgVersion {
            major_version: 1,
            minor_version: 0,
        },
    }))
}

fn register_v2(app_name: &str, is_media: bool) -> RpcRequest {
    RpcRequest::V2(V2Request::RegisterAppInterface(RegisterAppInterfaceV2 {
        app_name: app_name.to_string(),
        ngn_media_screen_app_name: None,
        tts_name: None,
        vr_synonyms: None,
        is_media_application: is_media,
        language_desired: Language::EnUs,
        hmi_display_language_desired: Language::EnUs,
        app_type: None,
        sync_msg_version: SyncMsgVersion {
            major_version: 2,
            minor_version: 0,
        },
    }))
}

fn bus_ok(id: u32, method: HmiMethod) -> HmiCommand {
    HmiCommand::Response(HmiResponse {
        id,
        method,
        result: ResultCode::Success,
    })
}

fn activate(h: &mut Harness, id: u32, app_name: &str) {
    h.send_hmi(HmiCommand::ActivateApp {
        id,
        app_name: app_name.to_string(),
    });
}

#[test]
fn activation_swap_tears_down_and_replays() {
    let mut h = Harness::new();
    h.open_session(1);
    h.open_session(2);
    h.send_request(1, 1, register_v1("A", true));
    h.send_request(2, 1, register_v2("B", false));
    h.drain_mobile();
    h.drain_hmi();

    activate(&mut h, 500, "A");
    h.drain_mobile();
    h.drain_hmi();

    // A builds its HMI footprint: a dual-type command, a menu, a choice set.
    h.send_request(
        1,
        2,
        RpcRequest::V1(V1Request::AddCommand {
            cmd_id: 42,
            menu_params: Some(MenuParams {
                menu_name: "Tune".to_string(),
                parent_id: None,
                position: None,
            }),
            vr_commands: Some(vec!["tune".to_string()]),
        }),
    );
    let (ui_add, _) = h.next_hmi_request();
    let (vr_add, _) = h.next_hmi_request();
    h.send_hmi(bus_ok(ui_add, HmiMethod::UiAddCommand));
    h.send_hmi(bus_ok(vr_add, HmiMethod::VrAddCommand));
    h.send_request(
        1,
        3,
        RpcRequest::V1(V1Request::AddSubMenu {
            menu_id: 7,
            menu_name: "Presets".to_string(),
            position: None,
        }),
    );
    let (submenu_add, _) = h.next_hmi_request();
    h.send_hmi(bus_ok(submenu_add, HmiMethod::UiAddSubMenu));
    h.send_request(
        1,
        4,
        RpcRequest::V1(V1Request::CreateInteractionChoiceSet {
            interaction_choice_set_id: 9,
            choice_set: vec![Choice {
                choice_id: 1,
                menu_name: "FM".to_string(),
                vr_commands: vec!["fm".to_string()],
            }],
        }),
    );
    let (choice_add, _) = h.next_hmi_request();
    h.send_hmi(bus_ok(choice_add, HmiMethod::UiCreateInteractionChoiceSet));
    h.drain_mobile();

    // Switch to B: A's footprint is removed first.
    activate(&mut h, 600, "B");

    let (session, notification) = h.next_notification();
    assert_eq!(session, 1);
    assert!(matches!(
        notification,
        RpcNotification::V1(V1Notification::OnHmiStatus {
            hmi_level: HmiLevel::Background,
            ..
        })
    ));

    let (del_ui, payload) = h.next_hmi_request();
    assert!(matches!(
        payload,
        HmiRequestPayload::UiDeleteCommand {
            app_id: 1,
            cmd_id: 42
        }
    ));
    let (del_vr, payload) = h.next_hmi_request();
    assert!(matches!(
        payload,
        HmiRequestPayload::VrDeleteCommand {
            app_id: 1,
            cmd_id: 42
        }
    ));
    let (del_menu, payload) = h.next_hmi_request();
    assert!(matches!(
        payload,
        HmiRequestPayload::UiDeleteSubMenu {
            app_id: 1,
            menu_id: 7
        }
    ));
    let (del_choice, payload) = h.next_hmi_request();
    assert!(matches!(
        payload,
        HmiRequestPayload::UiDeleteInteractionChoiceSet {
            app_id: 1,
            interaction_choice_set_id: 9
        }
    ));

    let (session, notification) = h.next_notification();
    assert_eq!(session, 2);
    assert!(matches!(
        notification,
        RpcNotification::V2(V2Notification::OnHmiStatus {
            hmi_level: HmiLevel::Full,
            ..
        })
    ));
    match h.next_hmi() {
        HmiOutbound::Response(HmiResult::ActivateApp { id, result }) => {
            assert_eq!(id, 600);
            assert_eq!(result, ResultCode::Success);
        }
        other => panic!("expected ActivateApp response, got: {other:?}"),
    }

    assert!(matches!(
        h.dispatcher.manager().registry().activation(),
        ActivationState::Switching { .. }
    ));

    // Teardown delete responses are absorbed and complete the switch.
    h.send_hmi(bus_ok(del_ui, HmiMethod::UiDeleteCommand));
    h.send_hmi(bus_ok(del_vr, HmiMethod::VrDeleteCommand));
    h.send_hmi(bus_ok(del_menu, HmiMethod::UiDeleteSubMenu));
    h.no_mobile_traffic();
    h.send_hmi(bus_ok(del_choice, HmiMethod::UiDeleteInteractionChoiceSet));
    h.no_mobile_traffic();
    assert_eq!(
        h.dispatcher.manager().registry().activation(),
        &ActivationState::Active { session_key: 2 }
    );

    // Switching back replays A's surviving footprint on the bus.
    activate(&mut h, 601, "A");

    let (session, notification) = h.next_notification();
    assert_eq!(session, 2);
    assert!(matches!(
        notification,
        RpcNotification::V2(V2Notification::OnHmiStatus {
            hmi_level: HmiLevel::Background,
            ..
        })
    ));

    let (replay_choice, payload) = h.next_hmi_request();
    assert!(matches!(
        payload,
        HmiRequestPayload::UiCreateInteractionChoiceSet {
            app_id: 1,
            interaction_choice_set_id: 9,
            ..
        }
    ));
    let (replay_menu, payload) = h.next_hmi_request();
    assert!(matches!(
        payload,
        HmiRequestPayload::UiAddSubMenu {
            app_id: 1,
            menu_id: 7,
            ..
        }
    ));
    let (replay_ui, payload) = h.next_hmi_request();
    assert!(matches!(
        payload,
        HmiRequestPayload::UiAddCommand {
            app_id: 1,
            cmd_id: 42,
            ..
        }
    ));
    let (replay_vr, payload) = h.next_hmi_request();
    assert!(matches!(
        payload,
        HmiRequestPayload::VrAddCommand {
            app_id: 1,
            cmd_id: 42,
            ..
        }
    ));

    let (session, notification) = h.next_notification();
    assert_eq!(session, 1);
    assert!(matches!(
        notification,
        RpcNotification::V1(V1Notification::OnHmiStatus {
            hmi_level: HmiLevel::Full,
            ..
        })
    ));
    assert!(matches!(
        h.next_hmi(),
        HmiOutbound::Response(HmiResult::ActivateApp {
            id: 601,
            result: ResultCode::Success
        })
    ));

    // Replay responses never surface as mobile responses.
    h.send_hmi(bus_ok(replay_choice, HmiMethod::UiCreateInteractionChoiceSet));
    h.send_hmi(bus_ok(replay_menu, HmiMethod::UiAddSubMenu));
    h.send_hmi(bus_ok(replay_ui, HmiMethod::UiAddCommand));
    h.send_hmi(bus_ok(replay_vr, HmiMethod::VrAddCommand));
    h.no_mobile_traffic();
}

#[test]
fn unregister_sweeps_in_flight_correlation() {
    let mut h = Harness::new();
    h.open_session(5);
    h.send_request(5, 1, register_v1("Radio", true));
    activate(&mut h, 500, "Radio");
    h.drain_mobile();
    h.drain_hmi();

    h.send_request(
        5,
        2,
        RpcRequest::V1(V1Request::Show(ShowV1 {
            main_field1: Some("x".to_string()),
            main_field2: None,
            alignment: None,
            status_bar: None,
            media_clock: None,
            media_track: None,
        })),
    );
    let (show_id, _) = h.next_hmi_request();

    h.send_request(5, 3, RpcRequest::V1(V1Request::UnregisterAppInterface {}));

    let (_, notification) = h.next_notification();
    assert!(matches!(
        notification,
        RpcNotification::V1(V1Notification::OnHmiStatus {
            hmi_level: HmiLevel::Background,
            ..
        })
    ));
    let (_, correlation, response) = h.next_response();
    assert_eq!(correlation, 3);
    assert!(matches!(
        response,
        RpcResponse::V1(V1Response::UnregisterAppInterface(body)) if body.success
    ));
    let (_, notification) = h.next_notification();
    assert!(matches!(
        notification,
        RpcNotification::V1(V1Notification::OnAppInterfaceUnregistered { .. })
    ));
    assert!(matches!(
        h.next_hmi(),
        HmiOutbound::Notification(HmiNotification::OnAppUnregistered { app_id: 5, .. })
    ));

    // The late Show response finds no correlation and produces nothing.
    h.send_hmi(bus_ok(show_id, HmiMethod::UiShow));
    h.no_mobile_traffic();
    assert_eq!(h.dispatcher.manager().correlations().outbound_len(), 0);
}

#[test]
fn driver_distraction_is_cached_and_replayed() {
    let mut h = Harness::new();
    h.open_session(1);
    h.open_session(2);
    h.send_request(1, 1, register_v1("A", true));
    h.send_request(2, 1, register_v2("B", false));
    activate(&mut h, 500, "A");
    h.drain_mobile();
    h.drain_hmi();

    h.send_hmi(HmiCommand::OnDriverDistraction {
        state: DriverDistractionState::DdOn,
    });
    let (session, notification) = h.next_notification();
    assert_eq!(session, 1);
    assert!(matches!(
        notification,
        RpcNotification::V1(V1Notification::OnDriverDistraction {
            state: DriverDistractionState::DdOn
        })
    ));

    activate(&mut h, 600, "B");
    let messages = h.drain_mobile();
    let replayed = messages.iter().any(|msg| {
        matches!(
            msg,
            applink_core::MobileOutbound::Notification {
                session_key: 2,
                notification: RpcNotification::V2(V2Notification::OnDriverDistraction {
                    state: DriverDistractionState::DdOn
                })
            }
        )
    });
    assert!(replayed, "cached driver distraction was not replayed: {messages:?}");
}

#[test]
fn button_subscription_moves_to_the_last_writer() {
    let mut h = Harness::new();
    h.open_session(1);
    h.open_session(2);
    h.send_request(1, 1, register_v1("A", true));
    h.send_request(2, 1, register_v2("B", false));
    activate(&mut h, 500, "A");
    h.drain_mobile();
    h.drain_hmi();

    h.send_request(
        1,
        2,
        RpcRequest::V1(V1Request::SubscribeButton {
            button_name: ButtonName::Ok,
        }),
    );
    h.drain_mobile();

    h.send_hmi(HmiCommand::OnButtonPress {
        name: ButtonName::Ok,
        mode: ButtonPressMode::Short,
        custom_button_id: None,
    });
    let (session, notification) = h.next_notification();
    assert_eq!(session, 1);
    assert!(matches!(
        notification,
        RpcNotification::V1(V1Notification::OnButtonPress {
            button_name: ButtonName::Ok,
            button_press_mode: ButtonPressMode::Short
        })
    ));

    activate(&mut h, 600, "B");
    h.drain_mobile();
    h.drain_hmi();
    h.send_request(
        2,
        2,
        RpcRequest::V2(V2Request::SubscribeButton {
            button_name: ButtonName::Ok,
        }),
    );
    h.drain_mobile();

    h.send_hmi(HmiCommand::OnButtonPress {
        name: ButtonName::Ok,
        mode: ButtonPressMode::Long,
        custom_button_id: None,
    });
    let (session, notification) = h.next_notification();
    assert_eq!(session, 2);
    assert!(matches!(
        notification,
        RpcNotification::V2(V2Notification::OnButtonPress {
            button_name: ButtonName::Ok,
            button_press_mode: ButtonPressMode::Long,
            custom_button_id: 0
        })
    ));
}

#[test]
fn on_command_routes_by_command_id() {
    let mut h = Harness::new();
    h.open_session(1);
    h.send_request(1, 1, register_v1("A", true));
    activate(&mut h, 500, "A");
    h.drain_mobile();
    h.drain_hmi();

    h.send_request(
        1,
        2,
        RpcRequest::V1(V1Request::AddCommand {
            cmd_id: 42,
            menu_params: Some(MenuParams {
                menu_name: "Tune".to_string(),
                parent_id: None,
                position: None,
            }),
            vr_commands: None,
        }),
    );
    let (ui_add, _) = h.next_hmi_request();
    h.send_hmi(bus_ok(ui_add, HmiMethod::UiAddCommand));
    h.drain_mobile();

    h.send_hmi(HmiCommand::UiOnCommand { cmd_id: 42 });
    let (session, notification) = h.next_notification();
    assert_eq!(session, 1);
    assert!(matches!(
        notification,
        RpcNotification::V1(V1Notification::OnCommand {
            cmd_id: 42,
            trigger_source: TriggerSource::Menu
        })
    ));

    h.send_hmi(HmiCommand::VrOnCommand { cmd_id: 42 });
    let (_, notification) = h.next_notification();
    assert!(matches!(
        notification,
        RpcNotification::V1(V1Notification::OnCommand {
            cmd_id: 42,
            trigger_source: TriggerSource::Vr
        })
    ));
}

#[test]
fn send_data_without_url_notifies_the_active_app() {
    let mut h = Harness::new();
    h.open_session(1);
    h.send_request(1, 1, register_v1("A", true));
    activate(&mut h, 500, "A");
    h.drain_mobile();
    h.drain_hmi();

    h.send_hmi(HmiCommand::SendData {
        id: 700,
        data: vec!["line-1".to_string(), "line-2".to_string()],
        url: None,
        timeout: None,
    });
    let (session, notification) = h.next_notification();
    assert_eq!(session, 1);
    match notification {
        RpcNotification::V1(V1Notification::OnEncodedSyncPData { data }) => {
            assert_eq!(data, vec!["line-1".to_string(), "line-2".to_string()]);
        }
        other => panic!("expected OnEncodedSyncPData, got: {other:?}"),
    }
    assert!(matches!(
        h.next_hmi(),
        HmiOutbound::Response(HmiResult::SendData {
            id: 700,
            result: ResultCode::Success
        })
    ));
}

#[test]
fn send_data_with_url_defers_and_acknowledges() {
    let mut h = Harness::new();
    h.open_session(1);
    h.send_request(1, 1, register_v1("A", true));
    activate(&mut h, 500, "A");
    h.drain_mobile();
    h.drain_hmi();

    h.send_hmi(HmiCommand::SendData {
        id: 701,
        data: vec!["payload".to_string()],
        url: Some("127.0.0.1:1".to_string()),
        timeout: Some(0),
    });
    // Best effort: the bus is answered before anything actually transmits.
    assert!(matches!(
        h.next_hmi(),
        HmiOutbound::Response(HmiResult::SendData {
            id: 701,
            result: ResultCode::Success
        })
    ));
    h.no_mobile_traffic();
}

#[test]
fn send_data_posts_staged_syncp_lines() {
    use std::io::Read;
    use std::net::TcpListener;
    use std::time::{Duration, Instant};

    let mut h = Harness::new();
    h.open_session(1);
    h.send_request(1, 1, register_v1("A", true));
    activate(&mut h, 500, "A");
    h.drain_mobile();
    h.drain_hmi();

    h.send_request(
        1,
        2,
        RpcRequest::V1(V1Request::EncodedSyncPData {
            data: Some(vec!["app-line".to_string()]),
        }),
    );
    h.drain_mobile();

    let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
    let addr = listener.local_addr().expect("listener addr");
    listener.set_nonblocking(true).expect("nonblocking listener");

    h.send_hmi(HmiCommand::SendData {
        id: 702,
        data: vec!["hmi-line".to_string()],
        url: Some(format!("127.0.0.1:{}", addr.port())),
        timeout: Some(0),
    });
    assert!(matches!(
        h.next_hmi(),
        HmiOutbound::Response(HmiResult::SendData {
            id: 702,
            result: ResultCode::Success
        })
    ));

    let deadline = Instant::now() + Duration::from_secs(5);
    let mut stream = loop {
        match listener.accept() {
            Ok((stream, _)) => break stream,
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                if Instant::now() >= deadline {
                    panic!("timeout waiting for the deferred post");
                }
                std::thread::sleep(Duration::from_millis(10));
            }
            Err(e) => panic!("accept failed: {e}"),
        }
    };
    stream.set_nonblocking(false).expect("blocking stream");
    stream
        .set_read_timeout(Some(Duration::from_secs(2)))
        .expect("read timeout");
    let mut received = String::new();
    stream.read_to_string(&mut received).expect("read post body");
    assert_eq!(received, "hmi-lineapp-line");

    // The staged lines were consumed by the upload; a second send carries
    // only the new HMI payload.
    h.send_hmi(HmiCommand::SendData {
        id: 703,
        data: vec!["again".to_string()],
        url: None,
        timeout: None,
    });
    let (_, notification) = h.next_notification();
    match notification {
        RpcNotification::V1(V1Notification::OnEncodedSyncPData { data }) => {
            assert_eq!(data, vec!["again".to_string()]);
        }
        other => panic!("expected OnEncodedSyncPData, got: {other:?}"),
    }
    h.drain_hmi();
}

#[test]
fn app_and_device_list_snapshots() {
    let mut h = Harness::new();

    h.send_hmi(HmiCommand::GetAppList { id: 800 });
    assert!(matches!(
        h.next_hmi(),
        HmiOutbound::Response(HmiResult::GetAppList {
            id: 800,
            result: ResultCode::GenericError,
            ..
        })
    ));

    h.open_session(1);
    h.send_request(1, 1, register_v1("A", true));
    h.drain_mobile();
    h.drain_hmi();

    h.send_hmi(HmiCommand::GetAppList { id: 801 });
    match h.next_hmi() {
        HmiOutbound::Response(HmiResult::GetAppList {
            id,
            result,
            app_list,
        }) => {
            assert_eq!(id, 801);
            assert_eq!(result, ResultCode::Success);
            assert_eq!(app_list.len(), 1);
            assert_eq!(app_list[0].app_name, "A");
            assert_eq!(app_list[0].app_id, 1);
            assert!(app_list[0].is_media_application);
        }
        other => panic!("expected GetAppList response, got: {other:?}"),
    }

    h.send_hmi(HmiCommand::GetDeviceList { id: 802 });
    match h.next_hmi() {
        HmiOutbound::Response(HmiResult::GetDeviceList {
            id,
            result,
            device_list,
        }) => {
            assert_eq!(id, 802);
            assert_eq!(result, ResultCode::Success);
            assert_eq!(device_list, vec!["BT-Device".to_string()]);
        }
        other => panic!("expected GetDeviceList response, got: {other:?}"),
    }
    assert_eq!(*h.discoveries.lock().unwrap(), 1);

    h.send_hmi(HmiCommand::OnDeviceChosen {
        device_name: "BT-Device".to_string(),
    });
    assert_eq!(h.connects.lock().unwrap().as_slice(), &[1]);
}

#[test]
fn on_ready_fires_capability_volley_and_feeds_registration() {
    let mut h = Harness::new();

    h.send_hmi(HmiCommand::OnReady);
    let requests = h.drain_hmi();
    assert_eq!(requests.len(), 8);

    h.send_hmi(HmiCommand::ButtonsGetCapabilitiesResponse {
        id: 1,
        capabilities: vec![applink_protocol::ButtonCapabilities {
            name: ButtonName::Ok,
            short_press_available: true,
            long_press_available: true,
            up_down_available: false,
        }],
        preset_bank_capabilities: None,
    });
    h.send_hmi(HmiCommand::UiGetLanguageResponse {
        id: 2,
        hmi_display_language: Language::DeDe,
    });

    h.open_session(4);
    h.send_request(4, 1, register_v1("Radio", false));
    let (_, _, response) = h.next_response();
    let RpcResponse::V1(V1Response::RegisterAppInterface(response)) = response else {
        panic!("expected a register response, got: {response:?}");
    };
    assert_eq!(response.language, Some(Language::DeDe));
    let buttons = response.button_capabilities.unwrap();
    assert_eq!(buttons.len(), 1);
    assert_eq!(buttons[0].name, ButtonName::Ok);
}
