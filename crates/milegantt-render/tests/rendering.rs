//! Integration tests: CSV in, spreadsheet and timeline out

use milegantt_core::{RenderError, Renderer};
use milegantt_parser::parse_csv;
use milegantt_render::{ExcelGanttRenderer, HtmlTimelineRenderer, TimelineLayout, DEFAULT_PALETTE};
use pretty_assertions::assert_eq;

const PROJECT_CSV: &str = "\
关键里程碑,开始时间,结束时间,负责人,模块
需求评审,20230301,20230310,工艺,设计
方案确认,,20230320,数采,
样机试制,,20230415,算法,
设备调试,20230416,20230510,电控,\"现场
实施\"
验收,,20230520,工艺,
";

fn normalized_table() -> milegantt_core::MilestoneTable {
    let mut table = parse_csv(PROJECT_CSV).unwrap();
    let report = table.normalize();
    assert_eq!(report.modules_filled, 3);
    assert_eq!(report.starts_filled, 3);
    table
}

#[test]
fn excel_plan_covers_the_whole_project() {
    let table = normalized_table();
    let plan = ExcelGanttRenderer::new().plan(&table).unwrap();

    // 2023-03-01 ..= 2023-05-20
    assert_eq!(plan.grid.day_count(), 81);
    assert_eq!(plan.header.len(), 5 + 81);
    assert_eq!(plan.header[0], "关键里程碑");
    assert_eq!(plan.header[5], "2023-03-01");
    assert_eq!(plan.header.last().map(String::as_str), Some("2023-05-20"));
    assert_eq!(plan.fills.len(), 5);
}

#[test]
fn excel_fills_are_contiguous_and_owner_colored() {
    let table = normalized_table();
    let plan = ExcelGanttRenderer::new().plan(&table).unwrap();

    // row 1 starts the day after row 0 ends, so fills abut
    for pair in plan.fills.windows(2) {
        assert_eq!(pair[0].columns.end() + 1, *pair[1].columns.start());
    }
    assert_eq!(plan.fills[0].color, 0xFFC7CE);
    assert_eq!(plan.fills[1].color, 0xFFEB9C);
    assert_eq!(plan.fills[2].color, 0xC6EFCE);
    assert_eq!(plan.fills[3].color, 0xD9EAD3);
}

#[test]
fn excel_output_is_a_zip() {
    let bytes = ExcelGanttRenderer::new().render(&normalized_table()).unwrap();
    assert!(bytes.len() > 1000);
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn excel_empty_table_fails() {
    let table = parse_csv("milestone,start,end,owner,module\n").unwrap();
    let result = ExcelGanttRenderer::new().render(&table);
    assert!(matches!(result, Err(RenderError::InvalidData(_))));
}

#[test]
fn timeline_layout_for_project() {
    let table = normalized_table();
    let palette: Vec<String> = DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect();
    let layout = TimelineLayout::build(&table, &palette, "#B0B0B0").unwrap();

    assert_eq!(layout.gridline_count(), 5);
    assert_eq!(layout.divider_rows(), vec![2, 4]);

    let labels: Vec<&str> = layout.ticks.iter().map(|(_, l)| l.as_str()).collect();
    assert_eq!(labels, vec!["2023-03", "04", "05"]);

    let owners: Vec<&str> = layout.owners.entries().iter().map(|(o, _)| o.as_str()).collect();
    assert_eq!(owners, vec!["工艺", "数采", "算法", "电控"]);
    assert_eq!(layout.slots[4].color, layout.slots[0].color);
}

#[test]
fn timeline_html_is_a_complete_document() {
    let mut table = normalized_table();
    table.title = "产品开发计划".into();
    let html = HtmlTimelineRenderer::new().render(&table).unwrap();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>产品开发计划</title>"));
    assert!(html.contains("</svg>"));
    assert_eq!(html.matches("class=\"task-bar\"").count(), 5);
    assert_eq!(html.matches("class=\"module-callout\"").count(), 2);
    assert!(html.trim_end().ends_with("</html>"));
}

#[test]
fn rows_keep_file_order_when_dates_do_not() {
    let input = "\
milestone,start,end,owner,module
Integration,20240301,20240320,A,Late
Prototype,20240110,20240131,B,Early
Review,20240201,20240210,A,Early
";
    let mut table = parse_csv(input).unwrap();
    table.normalize();

    let plan = ExcelGanttRenderer::new().plan(&table).unwrap();
    let rows: Vec<usize> = plan.fills.iter().map(|f| f.row).collect();
    assert_eq!(rows, vec![0, 1, 2]);
    assert!(plan.fills[0].columns.start() > plan.fills[1].columns.start());

    let palette: Vec<String> = DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect();
    let layout = TimelineLayout::build(&table, &palette, "#B0B0B0").unwrap();
    let labels: Vec<&str> = layout.slots.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Integration", "Prototype", "Review"]);
}
