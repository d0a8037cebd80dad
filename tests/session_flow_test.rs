//! 入庫作業の一連の流れ
//!
//! ログイン → MID照合 → 撮影 → 庫位 → 履歴検索 → 編集

use pda_inbound::config::Config;
use pda_inbound_common::{
    Event, FlowStep, Screen, ScreenKind, ScriptedDevice, Session,
};

fn start(device: &mut ScriptedDevice) -> Session {
    let config = Config {
        default_operator: Some("A1024".to_string()),
        ..Default::default()
    };
    let mut session = Session::new(config.session_config());
    session.handle(Event::LoginSubmit, device);
    device.advance(config.login_delay_ms as i64);
    session.handle(Event::Tick, device);
    session
}

#[test]
fn test_valid_mid_starts_capture() {
    let mut device = ScriptedDevice::new(1_000);
    let mut session = start(&mut device);

    session.handle(Event::MidInput("500983514986".into()), &mut device);
    session.handle(Event::MidSubmit, &mut device);

    let Screen::Capture(flow) = session.screen() else {
        panic!("入庫フローに遷移しない");
    };
    assert_eq!(flow.draft().mid, "500983514986");
    assert_eq!(flow.draft().operator, "A1024");
}

#[test]
fn test_invalid_mid_shows_error() {
    let mut device = ScriptedDevice::new(1_000);
    let mut session = start(&mut device);

    session.handle(Event::MidInput("999999999999".into()), &mut device);
    session.handle(Event::MidSubmit, &mut device);

    let Screen::Dashboard(dash) = session.screen() else {
        panic!("画面が変わった");
    };
    assert!(dash.show_error());
    assert_eq!(dash.mid_input, "999999999999");
}

#[test]
fn test_full_inbound_and_edit() {
    let mut device = ScriptedDevice::new(1_000)
        .with_weights([321])
        .with_photos(["file://box.jpg"]);
    let mut session = start(&mut device);

    // 1件目: 手入力
    session.handle(Event::MidInput("500983514986".into()), &mut device);
    session.handle(Event::MidSubmit, &mut device);
    session.handle(Event::Trigger, &mut device);
    assert_eq!(session.kind(), ScreenKind::Capture(FlowStep::WeightAndStorage));
    session.handle(Event::WeightInput("450".into()), &mut device);
    session.handle(Event::StorageCodeInput("ZK-ab3dfg7h".into()), &mut device);
    session.handle(Event::StorageSubmit, &mut device);

    // 2件目: スキャン
    device.advance(1_000);
    let mut device = device.with_codes(["YG-ABCDEFGH"]).with_mids(["500983514990"]);
    session.handle(Event::Trigger, &mut device);
    session.handle(Event::Trigger, &mut device);
    session.handle(Event::Trigger, &mut device);

    let records = session.store().records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].mid, "500983514990");
    assert_eq!(records[0].storage_code, "YG-ABCDEFGH");
    assert_eq!(records[1].weight, "450");
    assert_eq!(records[1].storage_code, "ZK-ab3dfg7h");
    assert_eq!(records[1].photo_url, "file://box.jpg");

    // 検索
    session.handle(Event::SearchInput("zk-AB".into()), &mut device);
    let Screen::Dashboard(dash) = session.screen() else {
        panic!("ダッシュボードではない");
    };
    let hits = dash.history(session.store());
    assert_eq!(hits.len(), 1);
    let target = hits[0].record.id.clone();

    // 編集
    session.handle(Event::OpenRecord(target.clone()), &mut device);
    session.handle(Event::DetailWeightInput("460".into()), &mut device);
    session.handle(Event::DetailSave, &mut device);

    let records = session.store().records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].id, target);
    assert_eq!(records[1].weight, "460");
    assert_eq!(records[1].storage_code, "ZK-ab3dfg7h");
    assert_eq!(records[0].weight, "1000");
}
